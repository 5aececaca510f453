// Type definitions for the Schwarzschild renderer

use std::f64::consts::PI;
use serde::Serialize;

use crate::constants;

// ============================================================================
// BLACK HOLE DEFINITION
// ============================================================================

// A Schwarzschild black hole, fixed for the duration of a run
//
// Physics: A non-rotating, uncharged black hole is completely described by
// its mass. Everything else (horizon radius, ISCO, Hawking temperature) is
// a closed-form function of M.
#[derive(Debug, Clone, Copy)]
pub struct BlackHole {
    // Mass in kg
    mass_kg: f64,

    // Geometric mass GM/c² in metres
    geometric_mass: f64,

    // Schwarzschild radius 2GM/c² in metres
    schwarzschild_radius: f64,
}

impl BlackHole {
    // Create a black hole from a mass in solar masses
    pub fn new(solar_mass: f64) -> Self {
        assert!(
            solar_mass.is_finite() && solar_mass > 0.0,
            "Mass must be positive and finite"
        );
        let mass_kg = solar_mass * constants::SOLAR_MASS;
        Self {
            mass_kg,
            geometric_mass: constants::geometric_mass(mass_kg),
            schwarzschild_radius: constants::schwarzschild_radius(mass_kg),
        }
    }

    #[inline]
    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    #[inline]
    pub fn geometric_mass(&self) -> f64 {
        self.geometric_mass
    }

    #[inline]
    pub fn schwarzschild_radius(&self) -> f64 {
        self.schwarzschild_radius
    }

    #[inline]
    pub fn isco_radius(&self) -> f64 {
        3.0 * self.schwarzschild_radius
    }

    #[inline]
    pub fn photon_sphere_radius(&self) -> f64 {
        1.5 * self.schwarzschild_radius
    }

    // Horizon area A = 4π r_s²
    pub fn horizon_area(&self) -> f64 {
        4.0 * PI * self.schwarzschild_radius * self.schwarzschild_radius
    }

    pub fn hawking_temperature(&self) -> f64 {
        constants::hawking_temperature(self.mass_kg)
    }

    pub fn hawking_luminosity(&self) -> f64 {
        constants::hawking_luminosity(self.mass_kg)
    }

    pub fn evaporation_time(&self) -> f64 {
        constants::evaporation_time(self.mass_kg)
    }

    pub fn entropy(&self) -> f64 {
        constants::bekenstein_hawking_entropy(self.mass_kg)
    }

    // Time dilation factor √(1 - r_s/r) for a static observer at radius r (m)
    pub fn time_dilation(&self, r: f64) -> f64 {
        if r <= self.schwarzschild_radius {
            return 0.0;
        }
        (1.0 - self.schwarzschild_radius / r).sqrt()
    }

    // Escape velocity c√(r_s/r) at radius r (m)
    pub fn escape_velocity(&self, r: f64) -> f64 {
        if r <= self.schwarzschild_radius {
            return constants::C;
        }
        constants::C * (self.schwarzschild_radius / r).sqrt()
    }

    // Kretschmann curvature scalar K = 48 M_g²/r⁶ (tidal strength diagnostic)
    pub fn kretschmann(&self, r: f64) -> f64 {
        48.0 * self.geometric_mass * self.geometric_mass / r.powi(6)
    }
}

// ============================================================================
// CAMERA / OBSERVER CONFIGURATION
// ============================================================================

// Camera at a fixed Schwarzschild radius looking toward the black hole
//
// The observer sits at (r_obs, θ_obs, φ=0) and rays leave the image plane
// parameterized by impact offsets (α, β). All lengths here are in units of
// the Schwarzschild radius; the observer distance is applied exactly once,
// at construction.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    // Observer radius in units of r_s
    pub r_observer: f64,

    // Polar angle of the observer (radians); π/2 is the equatorial plane
    pub theta_observer: f64,

    // Horizontal field of view (radians)
    pub fov_horizontal: f64,

    // Vertical field of view (radians), scaled by the aspect ratio
    pub fov_vertical: f64,

    // Image resolution in pixels
    pub width: usize,
    pub height: usize,
}

impl Camera {
    // Build a camera from run parameters
    //
    // The inclination is measured from the disk plane: 0° looks along the
    // plane, 90° looks down the polar axis, mapped as θ_obs = (90° - i)·π/180.
    pub fn new(
        observer_radius: f64, // in units of r_s
        inclination_deg: f64,
        fov_deg: f64,
        width: usize,
        height: usize,
    ) -> Self {
        assert!(observer_radius > 1.0, "Observer must sit outside the horizon");
        assert!(
            (0.0..=90.0).contains(&inclination_deg),
            "Inclination must be in [0°, 90°]"
        );
        assert!(fov_deg > 0.0, "FOV must be positive");
        assert!(width >= 1 && height >= 1, "Dimensions must be positive");

        let fov_horizontal = fov_deg * PI / 180.0;
        Self {
            r_observer: observer_radius,
            theta_observer: (90.0 - inclination_deg) * PI / 180.0,
            fov_horizontal,
            fov_vertical: fov_horizontal * height as f64 / width as f64,
            width,
            height,
        }
    }

    // Map pixel (i, j) to impact parameters (α, β) on the image plane,
    // with the image centre at (W/2, H/2)
    #[inline]
    pub fn impact_parameters(&self, i: usize, j: usize) -> (f64, f64) {
        let alpha = (i as f64 - self.width as f64 / 2.0) / self.width as f64
            * self.fov_horizontal
            * self.r_observer;
        let beta = (j as f64 - self.height as f64 / 2.0) / self.height as f64
            * self.fov_vertical
            * self.r_observer;
        (alpha, beta)
    }
}

// ============================================================================
// RUN CONFIGURATION
// ============================================================================

// The full run-configuration record handed in by the caller
//
// Validated once at the boundary; rendering never starts on a bad record.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSettings {
    // Black hole mass in solar masses
    pub solar_mass: f64,

    // Accretion rate as a fraction of the Eddington rate
    pub eddington_fraction: f64,

    // Image resolution in pixels
    pub width: usize,
    pub height: usize,

    // Observer distance in Schwarzschild radii
    pub observer_radius: f64,

    // Viewing inclination in degrees (0 = edge-on plane, 90 = pole-on)
    pub inclination: f64,

    // Horizontal field of view in degrees
    pub fov: f64,

    // Number of render threads
    pub threads: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            solar_mass: 10.0,
            eddington_fraction: 0.1,
            width: 800,
            height: 600,
            observer_radius: 100.0,
            inclination: 75.0,
            fov: 45.0,
            threads: 4,
        }
    }
}

impl RenderSettings {
    // Validate every field against its allowed range
    pub fn validate(&self) -> Result<(), String> {
        if !self.solar_mass.is_finite() || self.solar_mass <= 0.0 {
            return Err(format!("mass must be positive and finite, got {}", self.solar_mass));
        }
        if !self.eddington_fraction.is_finite() || self.eddington_fraction <= 0.0 {
            return Err(format!(
                "eddington fraction must be positive, got {}",
                self.eddington_fraction
            ));
        }
        if self.width < 1 || self.height < 1 {
            return Err(format!(
                "image dimensions must be at least 1x1, got {}x{}",
                self.width, self.height
            ));
        }
        if !self.observer_radius.is_finite() || self.observer_radius <= 1.0 {
            return Err(format!(
                "observer radius must exceed 1 r_s, got {}",
                self.observer_radius
            ));
        }
        if !(0.0..=90.0).contains(&self.inclination) {
            return Err(format!(
                "inclination must be in [0, 90] degrees, got {}",
                self.inclination
            ));
        }
        if !self.fov.is_finite() || self.fov <= 0.0 {
            return Err(format!("field of view must be positive, got {}", self.fov));
        }
        if self.threads < 1 {
            return Err("thread count must be at least 1".to_string());
        }
        Ok(())
    }

    // Build the camera described by this record
    pub fn camera(&self) -> Camera {
        Camera::new(
            self.observer_radius,
            self.inclination,
            self.fov,
            self.width,
            self.height,
        )
    }
}
