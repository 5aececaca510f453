// Shakura-Sunyaev accretion disk with thermal emission and
// relativistic corrections

use std::f64::consts::PI;

use crate::constants::{
    eddington_luminosity, BOLTZMANN_CONSTANT, C, C2, G, PLANCK_CONSTANT, SOLAR_MASS,
    STEFAN_BOLTZMANN,
};
use crate::image::Rgb;

// Radiative efficiency of a thin disk around a non-rotating black hole
const ACCRETION_EFFICIENCY: f64 = 0.1;

// ============================================================================
// DISK RING SUMMARY
// ============================================================================

// Local properties of one annulus, mostly for reporting
#[derive(Debug, Clone, Copy)]
pub struct DiskRing {
    // Ring radius (m)
    pub radius: f64,
    // Effective temperature (K)
    pub temperature: f64,
    // Radiated flux per unit area, σT⁴ (W/m²)
    pub flux: f64,
    // Keplerian orbital speed (m/s)
    pub orbital_speed: f64,
    // Gravitational redshift factor √(1 - r_s/r)
    pub redshift: f64,
}

// ============================================================================
// ACCRETION DISK
// ============================================================================

// Geometrically thin, optically thick disk in the equatorial plane
//
// Physics: The Shakura-Sunyaev solution balances viscous heating against
// local blackbody cooling, giving the classic T ∝ r^(-3/4) profile with a
// zero-torque cutoff at the inner edge. The disk spans the ISCO out to
// 500 r_s and its accretion rate is set as a fraction of the Eddington rate.
//
// All radii here are in metres; the temperature profile needs SI units.
#[derive(Debug, Clone, Copy)]
pub struct AccretionDisk {
    // Black hole mass (kg)
    mass: f64,
    // Mass accretion rate (kg/s)
    accretion_rate: f64,
    // Inner edge, the ISCO (m)
    r_inner: f64,
    // Outer edge (m)
    r_outer: f64,
    // Schwarzschild radius (m)
    rs: f64,
    // Characteristic temperature at the inner edge (K)
    t_star: f64,
}

impl AccretionDisk {
    pub fn new(solar_mass: f64, eddington_fraction: f64) -> Self {
        assert!(solar_mass > 0.0, "Mass must be positive");
        assert!(eddington_fraction > 0.0, "Eddington fraction must be positive");

        let mass = solar_mass * SOLAR_MASS;
        let rs = 2.0 * G * mass / C2;
        let r_inner = 3.0 * rs;
        let r_outer = 500.0 * rs;

        // Ṁ = ṁ L_Edd / (η c²)
        let accretion_rate =
            eddington_fraction * eddington_luminosity(solar_mass) / (ACCRETION_EFFICIENCY * C2);

        // T_* = [3GMṀ / (8πσ r_in³)]^(1/4)
        let t_star = (3.0 * G * mass * accretion_rate
            / (8.0 * PI * STEFAN_BOLTZMANN * r_inner.powi(3)))
        .powf(0.25);

        Self {
            mass,
            accretion_rate,
            r_inner,
            r_outer,
            rs,
            t_star,
        }
    }

    #[inline]
    pub fn r_inner(&self) -> f64 {
        self.r_inner
    }

    #[inline]
    pub fn r_outer(&self) -> f64 {
        self.r_outer
    }

    #[inline]
    pub fn accretion_rate(&self) -> f64 {
        self.accretion_rate
    }

    // Whether a radius (m) lies within the disk annulus
    #[inline]
    pub fn in_disk(&self, r: f64) -> bool {
        r >= self.r_inner && r <= self.r_outer
    }

    // ========================================================================
    // TEMPERATURE PROFILE
    // ========================================================================

    // Effective temperature T(r) = T_* (r/r_in)^(-3/4) [1 - (r_in/r)^(1/2)]^(1/4)
    //
    // Zero outside the annulus. The cutoff factor makes T vanish at the
    // inner edge (zero-torque boundary condition); the outer edge is a hard
    // truncation.
    pub fn temperature(&self, r: f64) -> f64 {
        if r < self.r_inner || r > self.r_outer {
            return 0.0;
        }
        let x = r / self.r_inner;
        let radial = x.powf(-0.75);
        let edge = (1.0 - (1.0 / x).sqrt()).powf(0.25);
        self.t_star * radial * edge
    }

    // The profile peaks at r = (49/36) r_in ≈ 1.361 r_in
    pub fn peak_temperature(&self) -> f64 {
        self.temperature(1.361 * self.r_inner)
    }

    // ========================================================================
    // BLACKBODY EMISSION
    // ========================================================================

    // Planck spectral radiance B(ν, T) = (2hν³/c²) / (exp(hν/kT) - 1)
    pub fn planck(&self, frequency: f64, temperature: f64) -> f64 {
        if temperature <= 0.0 {
            return 0.0;
        }
        let x = PLANCK_CONSTANT * frequency / (BOLTZMANN_CONSTANT * temperature);
        if x > 700.0 {
            // exp would overflow; the tail carries no radiance anyway
            return 0.0;
        }
        (2.0 * PLANCK_CONSTANT * frequency.powi(3) / C2) / (x.exp() - 1.0)
    }

    // Approximate visible colour of a blackbody at temperature T
    //
    // Piecewise fit over t = T/100 with logarithmic and power-law branches
    // per channel, clamped to [0, 1]. Good enough for rendering; this is a
    // colour approximation, not photometry.
    pub fn blackbody_rgb(&self, temperature: f64) -> Rgb {
        if temperature <= 0.0 {
            return Rgb::BLACK;
        }

        let t = temperature / 100.0;

        let r = if t <= 66.0 {
            1.0
        } else {
            1.29293618606274 * (t - 60.0).powf(-0.1332047592)
        };

        let g = if t <= 66.0 {
            0.390081578769871 * t.ln() - 0.631841443788627
        } else {
            1.12989086089529 * (t - 60.0).powf(-0.0755148492)
        };

        let b = if t >= 66.0 {
            1.0
        } else if t <= 19.0 {
            0.0
        } else {
            0.543206789110196 * (t - 10.0).ln() - 1.19625408914
        };

        Rgb::new(r, g, b).clamped()
    }

    // ========================================================================
    // RELATIVISTIC CORRECTIONS
    // ========================================================================

    // Keplerian orbital speed v = √(GM/r)
    #[inline]
    pub fn keplerian_speed(&self, r: f64) -> f64 {
        (G * self.mass / r).sqrt()
    }

    // Gravitational redshift factor z = √(1 - r_s/r); zero at and inside
    // the horizon
    pub fn redshift_factor(&self, r: f64) -> f64 {
        if r <= self.rs {
            return 0.0;
        }
        (1.0 - self.rs / r).sqrt()
    }

    // Relativistic Doppler factor D = 1 / (γ(1 - β cos φ))
    //
    // φ is taken directly as the angle between the orbital velocity and the
    // line of sight, which is only exact for an edge-on observer. The
    // renderer relies on this approximation as-is.
    pub fn doppler_factor(&self, r: f64, phi: f64) -> f64 {
        let beta = self.keplerian_speed(r) / C;
        let gamma = 1.0 / (1.0 - beta * beta).sqrt();
        1.0 / (gamma * (1.0 - beta * phi.cos()))
    }

    // Observed radiance: I_obs = I_emit (D·z)⁴ channel-wise
    //
    // D⁴ is the classical beaming law for isotropic emission; the extra z⁴
    // folds in gravitational time dilation of the emitted photons.
    pub fn observed_intensity(&self, r: f64, phi: f64) -> Rgb {
        let temperature = self.temperature(r);
        if temperature <= 0.0 {
            return Rgb::BLACK;
        }

        let color = self.blackbody_rgb(temperature);
        let d = self.doppler_factor(r, phi);
        let z = self.redshift_factor(r);

        color * (d * z).powi(4)
    }

    // ========================================================================
    // DISK PROPERTIES
    // ========================================================================

    // Summary of one annulus
    pub fn ring(&self, radius: f64) -> DiskRing {
        let temperature = self.temperature(radius);
        DiskRing {
            radius,
            temperature,
            flux: STEFAN_BOLTZMANN * temperature.powi(4),
            orbital_speed: self.keplerian_speed(radius),
            redshift: self.redshift_factor(radius),
        }
    }

    // Total radiated luminosity L = η' Ṁ c² with η' = 1 - √(r_s/r_in)
    pub fn total_luminosity(&self) -> f64 {
        let eta = 1.0 - (self.rs / self.r_inner).sqrt();
        eta * self.accretion_rate * C2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk() -> AccretionDisk {
        AccretionDisk::new(10.0, 0.1)
    }

    #[test]
    fn annulus_spans_isco_to_500_rs() {
        let d = disk();
        assert!((d.r_inner() / d.rs - 3.0).abs() < 1e-12);
        assert!((d.r_outer() / d.rs - 500.0).abs() < 1e-9);
        assert!(d.in_disk(d.r_inner()));
        assert!(d.in_disk(d.r_outer()));
        assert!(!d.in_disk(0.99 * d.r_inner()));
        assert!(!d.in_disk(1.01 * d.r_outer()));
    }

    #[test]
    fn accretion_rate_follows_eddington_scaling() {
        let d = disk();
        let expected = 0.1 * 1.26e39 / (0.1 * C2);
        assert!((d.accretion_rate() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn temperature_positive_inside_zero_outside() {
        let d = disk();
        for k in 1..100 {
            let r = d.r_inner() + (d.r_outer() - d.r_inner()) * k as f64 / 100.0;
            assert!(d.temperature(r) > 0.0, "T({}) should be positive", r);
        }
        assert_eq!(d.temperature(0.5 * d.r_inner()), 0.0);
        assert_eq!(d.temperature(2.0 * d.r_outer()), 0.0);
    }

    #[test]
    fn temperature_vanishes_at_inner_edge() {
        let d = disk();
        assert_eq!(d.temperature(d.r_inner()), 0.0);
        // and rises steeply just outside it
        assert!(d.temperature(1.05 * d.r_inner()) > 1e4);
    }

    #[test]
    fn temperature_peaks_near_1_361_r_inner() {
        let d = disk();
        let mut best_r = d.r_inner();
        let mut best_t = 0.0;
        for k in 0..=600 {
            let r = d.r_inner() * (1.0 + 2.0 * k as f64 / 600.0);
            let t = d.temperature(r);
            if t > best_t {
                best_t = t;
                best_r = r;
            }
        }
        assert!(
            (best_r / d.r_inner() - 1.361).abs() < 0.05,
            "peak at {} r_in",
            best_r / d.r_inner()
        );
        assert!((d.peak_temperature() - best_t).abs() / best_t < 1e-3);
    }

    #[test]
    fn blackbody_colour_is_clamped_and_sane() {
        let d = disk();
        for &t in &[50.0, 300.0, 2000.0, 6500.0, 20000.0, 1e6] {
            let c = d.blackbody_rgb(t);
            assert!((0.0..=1.0).contains(&c.r));
            assert!((0.0..=1.0).contains(&c.g));
            assert!((0.0..=1.0).contains(&c.b));
        }
        // cool bodies are red, blue channel off below 1900 K
        let warm = d.blackbody_rgb(1500.0);
        assert_eq!(warm.r, 1.0);
        assert_eq!(warm.b, 0.0);
    }

    #[test]
    fn blackbody_is_near_white_at_6500_kelvin() {
        let c = disk().blackbody_rgb(6500.0);
        assert!(c.r >= 0.9 && c.g >= 0.9 && c.b >= 0.9, "{:?}", c);
    }

    #[test]
    fn blackbody_is_black_at_zero() {
        assert_eq!(disk().blackbody_rgb(0.0), Rgb::BLACK);
        assert_eq!(disk().blackbody_rgb(-5.0), Rgb::BLACK);
    }

    #[test]
    fn planck_guards_against_overflow() {
        let d = disk();
        assert_eq!(d.planck(1e25, 100.0), 0.0);
        assert_eq!(d.planck(1e14, 0.0), 0.0);
        assert!(d.planck(1e14, 6000.0) > 0.0);
    }

    #[test]
    fn keplerian_speed_at_isco() {
        // v(3 r_s) = √(GM/3r_s) = c/√6
        let d = disk();
        let ratio = d.keplerian_speed(d.r_inner()) / C;
        assert!((ratio - 1.0 / 6.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn redshift_vanishes_at_horizon() {
        let d = disk();
        assert_eq!(d.redshift_factor(d.rs), 0.0);
        assert!(d.redshift_factor(1.0001 * d.rs) < 0.011);
        assert!(d.redshift_factor(100.0 * d.rs) > 0.99);
    }

    #[test]
    fn approaching_side_beams_brighter_than_receding() {
        let d = disk();
        let r = 10.0 * d.rs;
        // φ = 0 moves toward the observer, φ = π away
        assert!(d.doppler_factor(r, 0.0) > 1.0);
        assert!(d.doppler_factor(r, PI) < 1.0);

        let bright = d.observed_intensity(r, 0.0);
        let dim = d.observed_intensity(r, PI);
        assert!(bright.r > dim.r);
        assert!(bright.r + bright.g + bright.b > dim.r + dim.g + dim.b);
    }

    #[test]
    fn observed_intensity_dies_at_the_inner_edge() {
        let d = disk();
        // inside the ISCO there is no emitting material at all
        assert_eq!(d.observed_intensity(1.01 * d.rs, 0.0), Rgb::BLACK);
        assert_eq!(d.observed_intensity(d.r_inner(), 0.0), Rgb::BLACK);
    }

    #[test]
    fn total_luminosity_matches_binding_energy() {
        let d = disk();
        let eta = 1.0 - (1.0_f64 / 3.0).sqrt();
        let expected = eta * d.accretion_rate() * C2;
        assert!((d.total_luminosity() - expected).abs() / expected < 1e-12);
    }
}
