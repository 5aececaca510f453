// Relativistic ray tracer: per-pixel photon back-propagation and
// thread-parallel image assembly

use std::f64::consts::PI;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, warn};
use serde::Serialize;

use crate::background::SkyModel;
use crate::disk::AccretionDisk;
use crate::geodesic::{GeodesicState, RayOutcome, TraceResult};
use crate::image::{ImageBuffer, Rgb};
use crate::integration::{adaptive_step_size, reflect_polar, GeodesicIntegrator};
use crate::metric::SchwarzschildMetric;
use crate::types::{BlackHole, Camera, RenderSettings};
use crate::validation;

// Base affine step h₀; the per-step size is h₀ √(r/r_s)
const BASE_STEP: f64 = 0.1;

// Step budget per ray; exhausting it paints the magenta sentinel
const MAX_STEPS: usize = 10000;

// Capture when r drops below r_s times this factor
const HORIZON_TOLERANCE: f64 = 1.001;

// A ray is on the disk plane when |θ - π/2| falls below this. Plain window
// test on the post-step state; a crossing faster than the window can skip
// the disk, there is no root-finding between steps.
const DISK_PLANE_TOLERANCE: f64 = 0.01;

// ============================================================================
// RAY TRACER
// ============================================================================

// Traces photons backward from the observer through Schwarzschild spacetime
//
// Geometry runs in metres-free geometric units with the Schwarzschild radius
// as the length unit, so the metric is constructed with r_s = 1 and the
// observer sits at r = observer_radius. The disk works in SI for its
// temperature profile, so radii are scaled back to metres at disk lookups.
//
// The tracer is immutable during a render and shared by reference across
// worker threads; per-ray state lives on each worker's stack.
pub struct RayTracer {
    black_hole: BlackHole,
    metric: SchwarzschildMetric,
    disk: Option<AccretionDisk>,
    camera: Camera,
    sky: SkyModel,
    base_step: f64,
    max_steps: usize,
}

impl RayTracer {
    pub fn new(black_hole: BlackHole, disk: Option<AccretionDisk>, camera: Camera) -> Self {
        Self {
            black_hole,
            metric: SchwarzschildMetric::new(1.0),
            disk,
            camera,
            sky: SkyModel::GridAndStars,
            base_step: BASE_STEP,
            max_steps: MAX_STEPS,
        }
    }

    // Assemble a tracer from a validated run configuration
    pub fn from_settings(settings: &RenderSettings, include_disk: bool) -> Result<Self, String> {
        settings.validate()?;
        let black_hole = BlackHole::new(settings.solar_mass);
        let disk = if include_disk {
            Some(AccretionDisk::new(
                settings.solar_mass,
                settings.eddington_fraction,
            ))
        } else {
            None
        };
        Ok(Self::new(black_hole, disk, settings.camera()))
    }

    pub fn set_sky(&mut self, sky: SkyModel) {
        self.sky = sky;
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn black_hole(&self) -> &BlackHole {
        &self.black_hole
    }

    #[inline]
    pub fn disk(&self) -> Option<&AccretionDisk> {
        self.disk.as_ref()
    }

    // ========================================================================
    // INITIAL CONDITIONS
    // ========================================================================

    // Build the photon state at the observer for impact offsets (α, β)
    //
    // The photon leaves inbound with u^t fixed by unit energy. u^r then
    // follows from the null condition; the max(0, ·) soaks up roundoff when
    // the angular terms saturate the budget.
    pub fn initial_photon(&self, alpha: f64, beta: f64) -> GeodesicState {
        let r0 = self.camera.r_observer;
        let theta0 = self.camera.theta_observer;
        let f = 1.0 - 1.0 / r0;

        let u_t = 1.0 / f;
        let u_theta = beta / r0;
        let u_phi = alpha / (r0 * theta0.sin());

        // Null condition: -f(u^t)² + (u^r)²/f + r²(u^θ)² + r²sin²θ(u^φ)² = 0
        let term1 = f * u_t * u_t;
        let term2 = r0 * r0 * u_theta * u_theta;
        let term3 = r0 * r0 * theta0.sin().powi(2) * u_phi * u_phi;
        let u_r = -(f * (term1 - term2 - term3)).max(0.0).sqrt();

        GeodesicState {
            t: 0.0,
            r: r0,
            theta: theta0,
            phi: 0.0,
            u_t,
            u_r,
            u_theta,
            u_phi,
        }
    }

    // ========================================================================
    // SINGLE RAY
    // ========================================================================

    // Trace one photon to its terminal event
    //
    // Events are checked in a fixed order each iteration: horizon capture,
    // disk-plane crossing (first one only), then escape past 2 r_obs. A ray
    // that exhausts the step budget gets the magenta sentinel; that is a
    // diagnostic and must not happen on well-posed inputs.
    pub fn trace_ray(&self, alpha: f64, beta: f64) -> TraceResult {
        let mut state = self.initial_photon(alpha, beta);
        let mut integrator = GeodesicIntegrator::new(self.metric, self.base_step);
        let rs_m = self.black_hole.schwarzschild_radius();

        for step in 0..self.max_steps {
            // 1. Fell through the horizon
            if state.r < HORIZON_TOLERANCE * self.metric.schwarzschild_radius() {
                return TraceResult {
                    outcome: RayOutcome::Captured,
                    steps: step,
                    color: Rgb::BLACK,
                };
            }

            // 2. Crossed the equatorial plane inside the disk annulus
            if let Some(disk) = &self.disk {
                if (state.theta - PI / 2.0).abs() < DISK_PLANE_TOLERANCE
                    && disk.in_disk(state.r * rs_m)
                {
                    return TraceResult {
                        outcome: RayOutcome::DiskHit {
                            r: state.r,
                            phi: state.phi,
                        },
                        steps: step,
                        color: disk.observed_intensity(state.r * rs_m, state.phi),
                    };
                }
            }

            // 3. Escaped to the celestial sphere. Purely geometric: the
            // radius test does not ask whether the ray is outbound.
            if state.r > 2.0 * self.camera.r_observer {
                return TraceResult {
                    outcome: RayOutcome::Escaped {
                        theta: state.theta,
                        phi: state.phi,
                    },
                    steps: step,
                    color: self.sky.color(state.theta, state.phi),
                };
            }

            // Advance with a radius-adapted step, then keep θ on its chart
            integrator.set_step_size(adaptive_step_size(
                self.base_step,
                state.r,
                self.metric.schwarzschild_radius(),
            ));
            state = integrator.step(&state);
            reflect_polar(&mut state);
        }

        TraceResult {
            outcome: RayOutcome::Exhausted,
            steps: self.max_steps,
            color: Rgb::MAGENTA,
        }
    }

    // ========================================================================
    // FULL IMAGE
    // ========================================================================

    // Render the whole image across a fixed number of worker threads
    //
    // The raster is split into contiguous row blocks, one per thread, with
    // the last thread absorbing the remainder rows. Each worker owns its
    // block as a disjoint &mut slice, so there is no locking and no shared
    // mutable state beyond the atomic completed-row counter feeding the
    // progress callback. Pixel values are independent of the thread count.
    pub fn render<F>(&self, threads: usize, progress: F) -> RenderOutput
    where
        F: Fn(u64) + Sync + Send,
    {
        let width = self.camera.width;
        let height = self.camera.height;
        let threads = threads.clamp(1, height);

        let mut image = ImageBuffer::new(width, height);
        let rows_done = AtomicUsize::new(0);
        let captured = AtomicUsize::new(0);
        let disk_hits = AtomicUsize::new(0);
        let escaped = AtomicUsize::new(0);
        let exhausted = AtomicUsize::new(0);

        // Launch diagnostic for the centre ray
        let (ca, cb) = self.camera.impact_parameters(width / 2, height / 2);
        let centre = self.initial_photon(ca, cb);
        debug!(
            "centre ray null error at launch: {:.3e}",
            validation::relative_null_error(&self.metric, &centre)
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build render thread pool");

        let block = height / threads;
        pool.scope(|scope| {
            let rows_done = &rows_done;
            let captured = &captured;
            let disk_hits = &disk_hits;
            let escaped = &escaped;
            let exhausted = &exhausted;
            let progress = &progress;

            let mut remaining = image.pixels_mut();
            for t in 0..threads {
                let rows = if t + 1 == threads {
                    height - t * block
                } else {
                    block
                };
                let (chunk, rest) = std::mem::take(&mut remaining).split_at_mut(rows * width);
                remaining = rest;
                let row_start = t * block;

                scope.spawn(move |_| {
                    for (dj, row) in chunk.chunks_mut(width).enumerate() {
                        let j = row_start + dj;
                        for (i, pixel) in row.iter_mut().enumerate() {
                            let (alpha, beta) = self.camera.impact_parameters(i, j);
                            let result = self.trace_ray(alpha, beta);
                            match result.outcome {
                                RayOutcome::Captured => captured.fetch_add(1, Ordering::Relaxed),
                                RayOutcome::DiskHit { .. } => {
                                    disk_hits.fetch_add(1, Ordering::Relaxed)
                                }
                                RayOutcome::Escaped { .. } => {
                                    escaped.fetch_add(1, Ordering::Relaxed)
                                }
                                RayOutcome::Exhausted => {
                                    exhausted.fetch_add(1, Ordering::Relaxed)
                                }
                            };
                            *pixel = result.color;
                        }
                        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
                        progress(done as u64);
                    }
                });
            }
        });

        let stats = RenderStats {
            captured: captured.load(Ordering::Relaxed),
            disk_hits: disk_hits.load(Ordering::Relaxed),
            escaped: escaped.load(Ordering::Relaxed),
            exhausted: exhausted.load(Ordering::Relaxed),
        };
        if stats.exhausted > 0 {
            warn!(
                "{} rays exhausted the {}-step budget (magenta sentinel)",
                stats.exhausted, self.max_steps
            );
        }

        RenderOutput { image, stats }
    }
}

// ============================================================================
// RENDER RESULTS AND MANIFEST
// ============================================================================

// Counts of terminal events across the image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub captured: usize,
    pub disk_hits: usize,
    pub escaped: usize,
    pub exhausted: usize,
}

impl RenderStats {
    pub fn total(&self) -> usize {
        self.captured + self.disk_hits + self.escaped + self.exhausted
    }
}

// A finished render: the raster plus its event statistics
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub stats: RenderStats,
}

// Metadata written as manifest.json next to the image, tying the output
// back to the exact run configuration and derived physical scales
#[derive(Debug, Clone, Serialize)]
pub struct RenderManifest {
    pub settings: RenderSettings,
    pub schwarzschild_radius_m: f64,
    pub isco_radius_m: f64,
    pub disk_inner_m: Option<f64>,
    pub disk_outer_m: Option<f64>,
    pub peak_disk_temperature_k: Option<f64>,
    pub stats: RenderStats,
    pub render_seconds: f64,
    pub image_file: String,
}

impl RenderManifest {
    pub fn new(
        settings: RenderSettings,
        black_hole: &BlackHole,
        disk: Option<&AccretionDisk>,
        stats: RenderStats,
        render_seconds: f64,
        image_file: String,
    ) -> Self {
        Self {
            settings,
            schwarzschild_radius_m: black_hole.schwarzschild_radius(),
            isco_radius_m: black_hole.isco_radius(),
            disk_inner_m: disk.map(|d| d.r_inner()),
            disk_outer_m: disk.map(|d| d.r_outer()),
            peak_disk_temperature_k: disk.map(|d| d.peak_temperature()),
            stats,
            render_seconds,
            image_file,
        }
    }
}
