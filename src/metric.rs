// Schwarzschild metric: components, Christoffel symbols, geodesic equation

use crate::geodesic::GeodesicState;

// ============================================================================
// METRIC DEFINITION
// ============================================================================

// The Schwarzschild line element
//
//   ds² = -(1 - r_s/r) dt² + (1 - r_s/r)⁻¹ dr² + r² (dθ² + sin²θ dφ²)
//
// parameterized only by the Schwarzschild radius. The struct is unit-agnostic:
// r_s and every radius handed to it just have to be measured in the same unit.
//
// Failure policy: at r ≤ r_s the divergent Christoffel symbols return 0, so
// the derivative function stays finite and the caller's horizon check decides
// termination. The metric itself never terminates anything.
#[derive(Debug, Clone, Copy)]
pub struct SchwarzschildMetric {
    rs: f64,
}

impl SchwarzschildMetric {
    pub fn new(schwarzschild_radius: f64) -> Self {
        assert!(schwarzschild_radius > 0.0, "r_s must be positive");
        Self { rs: schwarzschild_radius }
    }

    #[inline]
    pub fn schwarzschild_radius(&self) -> f64 {
        self.rs
    }

    // ========================================================================
    // METRIC COMPONENTS
    // ========================================================================

    // g_tt = -(1 - r_s/r)
    pub fn g_tt(&self, r: f64) -> f64 {
        if r <= self.rs {
            return 0.0;
        }
        -(1.0 - self.rs / r)
    }

    // g_rr = 1/(1 - r_s/r); large sentinel inside the horizon
    pub fn g_rr(&self, r: f64) -> f64 {
        if r <= self.rs {
            return 1e10;
        }
        1.0 / (1.0 - self.rs / r)
    }

    // g_θθ = r²
    #[inline]
    pub fn g_theta_theta(&self, r: f64) -> f64 {
        r * r
    }

    // g_φφ = r² sin²θ
    #[inline]
    pub fn g_phi_phi(&self, r: f64, theta: f64) -> f64 {
        let s = theta.sin();
        r * r * s * s
    }

    // ========================================================================
    // NON-ZERO CHRISTOFFEL SYMBOLS
    // ========================================================================

    // Γ^t_tr = Γ^t_rt = r_s / (2r(r - r_s))
    pub fn christoffel_t_tr(&self, r: f64) -> f64 {
        if r <= self.rs {
            return 0.0;
        }
        self.rs / (2.0 * r * (r - self.rs))
    }

    // Γ^r_tt = r_s (r - r_s) / (2r³)
    pub fn christoffel_r_tt(&self, r: f64) -> f64 {
        if r <= self.rs {
            return 0.0;
        }
        self.rs * (r - self.rs) / (2.0 * r * r * r)
    }

    // Γ^r_rr = -r_s / (2r(r - r_s))
    pub fn christoffel_r_rr(&self, r: f64) -> f64 {
        if r <= self.rs {
            return 0.0;
        }
        -self.rs / (2.0 * r * (r - self.rs))
    }

    // Γ^r_θθ = -(r - r_s)
    #[inline]
    pub fn christoffel_r_theta_theta(&self, r: f64) -> f64 {
        -(r - self.rs)
    }

    // Γ^r_φφ = -(r - r_s) sin²θ
    #[inline]
    pub fn christoffel_r_phi_phi(&self, r: f64, theta: f64) -> f64 {
        let s = theta.sin();
        -(r - self.rs) * s * s
    }

    // Γ^θ_rθ = Γ^θ_θr = 1/r
    #[inline]
    pub fn christoffel_theta_r_theta(&self, r: f64) -> f64 {
        1.0 / r
    }

    // Γ^θ_φφ = -sinθ cosθ
    #[inline]
    pub fn christoffel_theta_phi_phi(&self, theta: f64) -> f64 {
        -theta.sin() * theta.cos()
    }

    // Γ^φ_rφ = Γ^φ_φr = 1/r
    #[inline]
    pub fn christoffel_phi_r_phi(&self, r: f64) -> f64 {
        1.0 / r
    }

    // Γ^φ_θφ = Γ^φ_φθ = cotθ
    #[inline]
    pub fn christoffel_phi_theta_phi(&self, theta: f64) -> f64 {
        theta.cos() / theta.sin()
    }

    // ========================================================================
    // GEODESIC EQUATION
    // ========================================================================

    // Right-hand side of the geodesic equation on the 8-vector state:
    //
    //   d x^μ/dλ  = u^μ
    //   d u^μ/dλ  = -Γ^μ_αβ u^α u^β   (symmetric α↔β pairs doubled)
    //
    // Returns (u^t, u^r, u^θ, u^φ, a^t, a^r, a^θ, a^φ).
    pub fn geodesic_derivatives(&self, state: &GeodesicState) -> [f64; 8] {
        let r = state.r;
        let theta = state.theta;

        let mut derivs = [0.0; 8];

        // Coordinate derivatives are just the velocities
        derivs[0] = state.u_t;
        derivs[1] = state.u_r;
        derivs[2] = state.u_theta;
        derivs[3] = state.u_phi;

        // d²t/dλ²
        derivs[4] = -2.0 * self.christoffel_t_tr(r) * state.u_t * state.u_r;

        // d²r/dλ²
        derivs[5] = -self.christoffel_r_tt(r) * state.u_t * state.u_t
            - self.christoffel_r_rr(r) * state.u_r * state.u_r
            - self.christoffel_r_theta_theta(r) * state.u_theta * state.u_theta
            - self.christoffel_r_phi_phi(r, theta) * state.u_phi * state.u_phi;

        // d²θ/dλ²
        derivs[6] = -2.0 * self.christoffel_theta_r_theta(r) * state.u_r * state.u_theta
            - self.christoffel_theta_phi_phi(theta) * state.u_phi * state.u_phi;

        // d²φ/dλ²
        derivs[7] = -2.0 * self.christoffel_phi_r_phi(r) * state.u_r * state.u_phi
            - 2.0 * self.christoffel_phi_theta_phi(theta) * state.u_theta * state.u_phi;

        derivs
    }

    // ========================================================================
    // INTEGRALS OF MOTION
    // ========================================================================

    // Specific energy E = (1 - r_s/r) u^t, conserved along geodesics
    pub fn specific_energy(&self, r: f64, u_t: f64) -> f64 {
        (1.0 - self.rs / r) * u_t
    }

    // Specific angular momentum L = r² sin²θ u^φ, conserved along geodesics
    pub fn specific_angular_momentum(&self, r: f64, theta: f64, u_phi: f64) -> f64 {
        let s = theta.sin();
        r * r * s * s * u_phi
    }

    // Effective potential for photons on equatorial orbits:
    // V²_eff = (1 - r_s/r) L²/r²
    pub fn photon_effective_potential(&self, r: f64, l: f64) -> f64 {
        (1.0 - self.rs / r) * l * l / (r * r)
    }
}
