// Null-condition diagnostics for photon states

use crate::geodesic::GeodesicState;
use crate::metric::SchwarzschildMetric;

// ============================================================================
// NULL GEODESIC INVARIANT
// ============================================================================

// Evaluate g_μν u^μ u^ν for a photon state
//
// Physics: Light follows null geodesics, so this contraction is exactly zero
// on the true trajectory. The integrator never re-projects onto the null
// cone, so any non-zero value here measures either an unbalanced initial
// state or accumulated integration drift. Diagnostic only; nothing in the
// render path acts on it.
pub fn null_invariant(metric: &SchwarzschildMetric, state: &GeodesicState) -> f64 {
    metric.g_tt(state.r) * state.u_t * state.u_t
        + metric.g_rr(state.r) * state.u_r * state.u_r
        + metric.g_theta_theta(state.r) * state.u_theta * state.u_theta
        + metric.g_phi_phi(state.r, state.theta) * state.u_phi * state.u_phi
}

// Null invariant normalized by the time-time term, so the result is a
// relative error independent of the affine parameterization
pub fn relative_null_error(metric: &SchwarzschildMetric, state: &GeodesicState) -> f64 {
    let scale = (metric.g_tt(state.r) * state.u_t * state.u_t).abs();
    if scale == 0.0 {
        return null_invariant(metric, state).abs();
    }
    null_invariant(metric, state).abs() / scale
}

// ============================================================================
// DRIFT STATISTICS
// ============================================================================

// Accumulates invariant errors sampled along rays
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidationStats {
    pub max_error: f64,
    pub mean_error: f64,
    pub samples: usize,
}

impl ValidationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, error: f64) {
        self.max_error = self.max_error.max(error);

        // Running mean
        let n = self.samples as f64;
        self.mean_error = (self.mean_error * n + error) / (n + 1.0);

        self.samples += 1;
    }

    pub fn report(&self) -> String {
        format!(
            "null-condition drift: max={:.2e}, mean={:.2e}, samples={}",
            self.max_error, self.mean_error, self.samples
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn balanced_radial_photon_is_null() {
        let metric = SchwarzschildMetric::new(1.0);
        let r = 50.0;
        let f = 1.0 - 1.0 / r;
        // for radial null rays u^r = -f u^t, which is -1 when u^t = 1/f
        let state = GeodesicState {
            t: 0.0,
            r,
            theta: PI / 2.0,
            phi: 0.0,
            u_t: 1.0 / f,
            u_r: -1.0,
            u_theta: 0.0,
            u_phi: 0.0,
        };
        // -f (1/f)² + (1/f)(1)² = 0
        assert!(relative_null_error(&metric, &state) < 1e-14);
    }

    #[test]
    fn timelike_state_is_flagged() {
        let metric = SchwarzschildMetric::new(1.0);
        let state = GeodesicState {
            t: 0.0,
            r: 50.0,
            theta: PI / 2.0,
            phi: 0.0,
            u_t: 2.0,
            u_r: 0.0,
            u_theta: 0.0,
            u_phi: 0.0,
        };
        assert!(relative_null_error(&metric, &state) > 0.5);
    }

    #[test]
    fn stats_track_max_and_mean() {
        let mut stats = ValidationStats::new();
        stats.update(1e-10);
        stats.update(2e-10);
        stats.update(3e-10);

        assert_eq!(stats.samples, 3);
        assert!((stats.max_error - 3e-10).abs() < 1e-15);
        assert!((stats.mean_error - 2e-10).abs() < 1e-15);
    }
}
