// Schwarzschild Black Hole Renderer CLI
//
// Builds the scene from command-line parameters, traces the image on a
// worker pool, and writes PPM/CSV output plus a JSON manifest.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use blackhole_raytracer::constants;
use blackhole_raytracer::image;
use blackhole_raytracer::{
    AccretionDisk, BlackHole, RayTracer, RenderManifest, RenderSettings,
};

/// CLI arguments for the renderer
#[derive(Parser, Debug)]
#[command(name = "render")]
#[command(about = "Render a Schwarzschild black hole with relativistic ray tracing", long_about = None)]
struct Args {
    /// Black hole mass in solar masses
    #[arg(short, long, default_value_t = 10.0)]
    mass: f64,

    /// Accretion rate as a fraction of the Eddington rate
    #[arg(short, long, default_value_t = 0.1)]
    eddington: f64,

    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Observer distance in Schwarzschild radii
    #[arg(short, long, default_value_t = 100.0)]
    distance: f64,

    /// Viewing inclination in degrees (0 = edge-on, 90 = pole-on)
    #[arg(short, long, default_value_t = 75.0)]
    inclination: f64,

    /// Horizontal field of view in degrees
    #[arg(short, long, default_value_t = 45.0)]
    fov: f64,

    /// Number of render threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Also write the raster as CSV
    #[arg(long, default_value_t = false)]
    csv: bool,

    /// Gzip-compress the CSV output (creates .csv.gz)
    #[arg(long, default_value_t = false)]
    gzip: bool,

    /// Render without the accretion disk
    #[arg(long, default_value_t = false)]
    no_disk: bool,

    /// Print the physics analysis and exit without rendering
    #[arg(long, default_value_t = false)]
    report: bool,

    /// Suppress the parameter block and progress bar
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

fn print_parameters(settings: &RenderSettings, black_hole: &BlackHole) {
    let rs = black_hole.schwarzschild_radius();

    println!("\nSchwarzschild Black Hole Renderer");
    println!("=======================================");
    println!("  Mass: {} solar masses ({:.3e} kg)", settings.solar_mass, black_hole.mass_kg());
    println!("  Schwarzschild radius: {:.3} m ({:.1} km)", rs, rs / 1000.0);
    println!("  Hawking temperature: {:.2e} K", black_hole.hawking_temperature());
    println!("  Resolution: {}x{}", settings.width, settings.height);
    println!(
        "  Observer: {} r_s ({:.2e} m), inclination {:.1} deg",
        settings.observer_radius,
        settings.observer_radius * rs,
        settings.inclination
    );
    println!("  Field of view: {:.1} deg", settings.fov);
    println!("  Threads: {}", settings.threads);
    println!("=======================================\n");
}

fn print_physics_report(black_hole: &BlackHole, disk: Option<&AccretionDisk>) {
    let rs = black_hole.schwarzschild_radius();

    println!("\nBlack Hole Physics Report");
    println!("=======================================");

    println!("\nGeometric properties:");
    println!("  Schwarzschild radius: {:.6e} m", rs);
    println!("  ISCO radius: {:.6e} m", black_hole.isco_radius());
    println!("  Photon sphere radius: {:.6e} m", black_hole.photon_sphere_radius());
    println!("  Horizon area: {:.6e} m^2", black_hole.horizon_area());

    println!("\nThermodynamics:");
    println!("  Hawking temperature: {:.3e} K", black_hole.hawking_temperature());
    println!("  Hawking luminosity: {:.3e} W", black_hole.hawking_luminosity());
    println!("  Bekenstein-Hawking entropy: {:.3e} J/K", black_hole.entropy());
    let t_evap = black_hole.evaporation_time();
    println!(
        "  Evaporation time: {:.3e} s ({:.3e} years)",
        t_evap,
        t_evap / (365.25 * 24.0 * 3600.0)
    );

    println!("\nRelativistic effects:");
    for &factor in &[1.5, 2.0, 3.0, 5.0, 10.0, 100.0] {
        let r = factor * rs;
        let dilation = black_hole.time_dilation(r);
        let v_escape = black_hole.escape_velocity(r);
        println!(
            "  r = {:>5.1} r_s: time dilation = {:.4}, v_escape = {:.2e} m/s ({:.1}% c)",
            factor,
            dilation,
            v_escape,
            100.0 * v_escape / constants::C
        );
    }

    if let Some(disk) = disk {
        println!("\nAccretion disk:");
        println!("  Inner radius (ISCO): {:.3e} m", disk.r_inner());
        println!("  Outer radius: {:.3e} m", disk.r_outer());
        println!("  Accretion rate: {:.3e} kg/s", disk.accretion_rate());
        println!("  Peak temperature: {:.3e} K", disk.peak_temperature());
        println!("  Total luminosity: {:.3e} W", disk.total_luminosity());
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    let settings = RenderSettings {
        solar_mass: args.mass,
        eddington_fraction: args.eddington,
        width: args.width,
        height: args.height,
        observer_radius: args.distance,
        inclination: args.inclination,
        fov: args.fov,
        threads: args.threads,
    };
    settings.validate()?;

    let tracer = RayTracer::from_settings(&settings, !args.no_disk)?;

    if args.report {
        print_physics_report(tracer.black_hole(), tracer.disk());
        return Ok(());
    }

    if !args.quiet {
        print_parameters(&settings, tracer.black_hole());
        println!("Tracing geodesics...");
    }

    // Progress over completed rows, fed by the renderer's atomic counter
    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(settings.height as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%)")?
                .progress_chars("=> "),
        );
        pb
    };

    let start = Instant::now();
    let output = tracer.render(settings.threads, |rows| pb.set_position(rows));
    let elapsed = start.elapsed().as_secs_f64();
    pb.finish_and_clear();

    let total_pixels = settings.width * settings.height;
    if !args.quiet {
        println!("Render complete in {:.2} s ({:.0} pixels/s)", elapsed, total_pixels as f64 / elapsed);
        println!(
            "  captured: {}, disk: {}, escaped: {}, exhausted: {}",
            output.stats.captured, output.stats.disk_hits, output.stats.escaped, output.stats.exhausted
        );
        if output.stats.exhausted > 0 {
            eprintln!(
                "  warning: {} rays hit the step budget (magenta sentinel pixels)",
                output.stats.exhausted
            );
        }
    }

    // Write image, optional CSV, and the manifest
    fs::create_dir_all(&args.output)?;
    let stem = format!(
        "blackhole_M{:.0}_inc{:.0}_{}x{}",
        settings.solar_mass, settings.inclination, settings.width, settings.height
    );

    let ppm_path = args.output.join(format!("{}.ppm", stem));
    image::save_ppm(&output.image, &ppm_path)?;
    if !args.quiet {
        println!("  wrote {}", ppm_path.display());
    }

    if args.csv {
        let csv_name = if args.gzip {
            format!("{}.csv.gz", stem)
        } else {
            format!("{}.csv", stem)
        };
        let csv_path = args.output.join(csv_name);
        image::save_csv(&output.image, &csv_path, args.gzip)?;
        if !args.quiet {
            println!("  wrote {}", csv_path.display());
        }
    }

    let manifest = RenderManifest::new(
        settings,
        tracer.black_hole(),
        tracer.disk(),
        output.stats,
        elapsed,
        format!("{}.ppm", stem),
    );
    let manifest_path = args.output.join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    if !args.quiet {
        println!("  wrote {}", manifest_path.display());
    }

    Ok(())
}
