// Procedural celestial sphere behind the black hole

use std::f64::consts::PI;

use crate::image::Rgb;

// Angular spacing of the coordinate grid lines (15°)
const GRID_SPACING: f64 = PI / 12.0;

// Half-thickness of a grid line in radians
const GRID_THICKNESS: f64 = 0.02;

// ============================================================================
// SKY MODEL
// ============================================================================

// Deterministic background for rays that escape to infinity
//
// The grid variant draws latitude/longitude lines every 15° so lensing
// distortion is visible, with a sparse pseudo-random star field in between.
// Both are pure functions of direction; no texture data, no RNG state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyModel {
    // Coordinate grid plus procedural stars
    GridAndStars,
    // Featureless dark sky
    Flat,
}

impl SkyModel {
    // Colour of the celestial sphere in direction (θ, φ)
    pub fn color(&self, theta: f64, phi: f64) -> Rgb {
        match self {
            SkyModel::GridAndStars => grid_and_stars(theta, phi),
            SkyModel::Flat => Rgb::new(0.02, 0.02, 0.05),
        }
    }
}

fn grid_and_stars(theta: f64, phi: f64) -> Rgb {
    // Normalize the azimuth into [0, 2π)
    let mut lon = phi % (2.0 * PI);
    if lon < 0.0 {
        lon += 2.0 * PI;
    }
    let lat = theta - PI / 2.0;

    // Latitude lines at multiples of 15° between the poles
    let mut on_lat_line = false;
    for k in -6..=6 {
        if (lat - k as f64 * GRID_SPACING).abs() < GRID_THICKNESS {
            on_lat_line = true;
            break;
        }
    }

    // Longitude lines, with wrap-around at 2π
    let mut on_lon_line = false;
    for k in 0..24 {
        let diff = (lon - k as f64 * GRID_SPACING).abs();
        if diff < GRID_THICKNESS || (2.0 * PI - diff) < GRID_THICKNESS {
            on_lon_line = true;
            break;
        }
    }

    if on_lat_line || on_lon_line {
        // Purple-blue gradient keyed to the azimuth
        let h = lon / (2.0 * PI);
        return Rgb::new(0.2 + 0.3 * h, 0.1, 0.4 + 0.2 * (1.0 - h));
    }

    // Sparse star field: a seeded sine hash raised to a high power leaves
    // only a few bright points, on a faint floor
    let seed = theta * 100.0 + phi * 57.0;
    let star = ((seed * 12345.6789).sin() + 1.0) / 2.0;
    let star = star.powi(100);

    Rgb::new(0.01 + 0.5 * star, 0.01 + 0.5 * star, 0.03 + 0.5 * star)
}
