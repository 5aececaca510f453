// Fundamental physical constants and closed-form black hole formulas

use std::f64::consts::PI;

// ============================================================================
// FUNDAMENTAL CONSTANTS (SI)
// ============================================================================

// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299792458.0;
pub const C: f64 = SPEED_OF_LIGHT;
pub const C2: f64 = C * C;

// Gravitational constant (m³/(kg·s²))
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;
pub const G: f64 = GRAVITATIONAL_CONSTANT;

// Planck constant (J·s)
pub const PLANCK_CONSTANT: f64 = 6.62607015e-34;
pub const H_BAR: f64 = PLANCK_CONSTANT / (2.0 * PI);

// Boltzmann constant (J/K)
pub const BOLTZMANN_CONSTANT: f64 = 1.380649e-23;

// Stefan-Boltzmann constant (W/(m²·K⁴))
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;

// Solar mass (kg)
pub const SOLAR_MASS: f64 = 1.98892e30;

// Eddington luminosity per solar mass (W)
// L_Edd = 4πGMm_p c / σ_T ≈ 1.26×10³⁸ M/M☉ W
pub const EDDINGTON_LUMINOSITY_SOLAR: f64 = 1.26e38;

// ============================================================================
// CLOSED-FORM BLACK HOLE FORMULAS
// ============================================================================

// Schwarzschild radius for mass M in kg: r_s = 2GM/c²
#[inline]
pub fn schwarzschild_radius(mass_kg: f64) -> f64 {
    2.0 * G * mass_kg / C2
}

// Geometric mass GM/c² in metres (half the Schwarzschild radius)
#[inline]
pub fn geometric_mass(mass_kg: f64) -> f64 {
    G * mass_kg / C2
}

// Innermost stable circular orbit: 3 r_s for Schwarzschild
#[inline]
pub fn isco_radius(mass_kg: f64) -> f64 {
    3.0 * schwarzschild_radius(mass_kg)
}

// Photon sphere radius: 1.5 r_s
#[inline]
pub fn photon_sphere_radius(mass_kg: f64) -> f64 {
    1.5 * schwarzschild_radius(mass_kg)
}

// Hawking temperature (K): T = ħc³ / (8πGMk_B)
pub fn hawking_temperature(mass_kg: f64) -> f64 {
    H_BAR * C * C * C / (8.0 * PI * G * mass_kg * BOLTZMANN_CONSTANT)
}

// Hawking luminosity (W): L = ħc⁶ / (15360πG²M²)
pub fn hawking_luminosity(mass_kg: f64) -> f64 {
    H_BAR * C.powi(6) / (15360.0 * PI * G * G * mass_kg * mass_kg)
}

// Evaporation time (s): t = 5120πG²M³ / (ħc⁴)
pub fn evaporation_time(mass_kg: f64) -> f64 {
    5120.0 * PI * G * G * mass_kg.powi(3) / (H_BAR * C.powi(4))
}

// Bekenstein-Hawking entropy (J/K): S = k_B c³ A / (4Għ) with A = 4π r_s²
pub fn bekenstein_hawking_entropy(mass_kg: f64) -> f64 {
    let rs = schwarzschild_radius(mass_kg);
    let area = 4.0 * PI * rs * rs;
    BOLTZMANN_CONSTANT * C * C * C * area / (4.0 * G * H_BAR)
}

// Surface gravity at the horizon (m/s²): κ = c² / (2 r_s)
pub fn surface_gravity(mass_kg: f64) -> f64 {
    C2 / (2.0 * schwarzschild_radius(mass_kg))
}

// Eddington luminosity for a mass in solar masses (W)
#[inline]
pub fn eddington_luminosity(solar_masses: f64) -> f64 {
    EDDINGTON_LUMINOSITY_SOLAR * solar_masses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schwarzschild_radius_matches_definition() {
        // r_s = 2GM/c² to full precision, for a range of masses
        for &solar in &[1.0, 10.0, 100.0, 4.3e6] {
            let m = solar * SOLAR_MASS;
            let expected = 2.0 * G * m / (C * C);
            assert_eq!(schwarzschild_radius(m), expected);
        }
    }

    #[test]
    fn one_solar_mass_radius_is_about_three_km() {
        let rs = schwarzschild_radius(SOLAR_MASS);
        assert!((rs - 2953.0).abs() < 10.0, "r_s(M☉) = {} m", rs);
    }

    #[test]
    fn isco_and_photon_sphere_ratios() {
        let m = 10.0 * SOLAR_MASS;
        let rs = schwarzschild_radius(m);
        assert!((isco_radius(m) / rs - 3.0).abs() < 1e-12);
        assert!((photon_sphere_radius(m) / rs - 1.5).abs() < 1e-12);
    }

    #[test]
    fn hawking_temperature_scales_inversely_with_mass() {
        let t1 = hawking_temperature(SOLAR_MASS);
        let t10 = hawking_temperature(10.0 * SOLAR_MASS);
        assert!((t1 / t10 - 10.0).abs() < 1e-9);
        // ~6.17e-8 K for one solar mass
        assert!(t1 > 6.0e-8 && t1 < 6.4e-8, "T_H(M☉) = {} K", t1);
    }

    #[test]
    fn evaporation_time_is_astronomical_for_stellar_masses() {
        // ~10⁶⁷ years for one solar mass
        let t = evaporation_time(SOLAR_MASS);
        let years = t / (365.25 * 24.0 * 3600.0);
        assert!(years > 1e66 && years < 1e68);
    }

    #[test]
    fn eddington_luminosity_is_linear_in_mass() {
        assert_eq!(eddington_luminosity(10.0), 1.26e39);
    }
}
