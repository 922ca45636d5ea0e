//! Surfacegen CLI - Procedural planetary surface generator.
//!
//! Generate tectonic-plate-driven planetary surfaces on a cube-sphere
//! region graph and print summary statistics.

use clap::{Parser, Subcommand};
use std::time::Instant;

use surfacegen::{FailurePolicy, Surface, SurfaceGenerator, TectonicPlate};

/// Procedural planetary surface generator.
#[derive(Parser)]
#[command(name = "surfacegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a surface and print summary statistics.
    Generate {
        /// Per-face resolution in regions (e.g., 16, 32, 64).
        #[arg(short, long, default_value = "16")]
        resolution: u32,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of tectonic plates.
        #[arg(long, default_value = "12")]
        plates: i64,

        /// Upper bound for random plate shift magnitude.
        #[arg(long, default_value = "0.1")]
        shift_magnitude: f32,

        /// Elevation change per unit of collision pressure.
        #[arg(long, default_value = "0.25")]
        collision_strength: f32,

        /// Number of noise octaves.
        #[arg(long, default_value = "4")]
        octaves: i64,

        /// Base noise frequency.
        #[arg(long, default_value = "2.0")]
        frequency: f32,

        /// Noise contribution to elevation.
        #[arg(long, default_value = "0.35")]
        perlin_strength: f32,

        /// Half-width of the random per-plate baseline elevation range.
        #[arg(long, default_value = "0.5")]
        random_range: f32,

        /// Disable the fractal noise contribution.
        #[arg(long)]
        no_perlin: bool,

        /// Disable neighbor averaging of boundary elevations.
        #[arg(long)]
        no_filter: bool,

        /// Disable collision elevation (per-plate baselines only).
        #[arg(long)]
        no_collisions: bool,

        /// Fail instead of returning a partial surface when a modifier fails.
        #[arg(long)]
        strict: bool,
    },

    /// Display information about a surface configuration.
    Info {
        /// Per-face resolution in regions.
        #[arg(short, long, default_value = "16")]
        resolution: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            resolution,
            seed,
            plates,
            shift_magnitude,
            collision_strength,
            octaves,
            frequency,
            perlin_strength,
            random_range,
            no_perlin,
            no_filter,
            no_collisions,
            strict,
        } => {
            run_generate(
                resolution,
                seed,
                plates,
                shift_magnitude,
                collision_strength,
                octaves,
                frequency,
                perlin_strength,
                random_range,
                no_perlin,
                no_filter,
                no_collisions,
                strict,
            );
        }
        Commands::Info { resolution } => {
            run_info(resolution);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    resolution: u32,
    seed: Option<u64>,
    plates: i64,
    shift_magnitude: f32,
    collision_strength: f32,
    octaves: i64,
    frequency: f32,
    perlin_strength: f32,
    random_range: f32,
    no_perlin: bool,
    no_filter: bool,
    no_collisions: bool,
    strict: bool,
) {
    if resolution < 1 || resolution > 1024 {
        eprintln!("Error: Resolution must be between 1 and 1024");
        std::process::exit(1);
    }

    if plates < 1 {
        eprintln!("Error: Plate count must be at least 1");
        std::process::exit(1);
    }

    // Generate seed if not provided.
    let seed = seed.unwrap_or_else(rand::random);

    println!("Surfacegen - Procedural Planetary Surface Generator");
    println!("===================================================");
    println!("Resolution: {}x{} per face", resolution, resolution);
    println!("Seed: {}", seed);
    println!("Plates: {}", plates);

    let start = Instant::now();

    let mut generator = match SurfaceGenerator::new(&["plates", "elevation"]) {
        Ok(generator) => generator,
        Err(error) => {
            eprintln!("Error building pipeline: {}", error);
            std::process::exit(1);
        }
    };
    if strict {
        generator.set_failure_policy(FailurePolicy::Propagate);
    }

    // Modifier seeds are derived from the one CLI seed so a single value
    // reproduces the whole surface.
    if let Some(item) = generator.get_modifier("plates") {
        item.modifier
            .borrow_mut()
            .config_mut()
            .set_i64("plateCount", plates)
            .set_f32("shiftMagnitude", shift_magnitude)
            .set_i64("seed", (seed % (i64::MAX as u64)) as i64);
    }
    if let Some(item) = generator.get_modifier("elevation") {
        item.modifier
            .borrow_mut()
            .config_mut()
            .set_f32("collisionStrength", collision_strength)
            .set_i64("perlinOctaves", octaves)
            .set_f32("perlinFrequency", frequency)
            .set_f32("perlinStrength", perlin_strength)
            .set_f32("elevationRandomRange", random_range)
            .set_bool("usePerlin", !no_perlin)
            .set_bool("useFilter", !no_filter)
            .set_bool("usePlateCollisions", !no_collisions)
            .set_i64("seed", (seed.wrapping_add(1) % (i64::MAX as u64)) as i64);
    }

    println!("\nGenerating surface...");
    let surface = match generator.generate(resolution) {
        Ok(surface) => surface,
        Err(error) => {
            eprintln!("Error during generation: {}", error);
            std::process::exit(1);
        }
    };

    let gen_time = start.elapsed();
    println!("Generation completed in {:.2?}", gen_time);

    print_surface_stats(&surface);
}

fn print_surface_stats(surface: &Surface) {
    println!("\nSurface statistics:");
    println!("  Regions: {}", surface.region_count());
    println!("  Plates:  {}", surface.plates.len());

    for plate in &surface.plates {
        println!(
            "    Plate {:>3}: {:>6} regions ({:>5} on edges), shift magnitude {:.4}",
            plate.id,
            plate.member_regions().len(),
            plate.edge_regions().len(),
            plate.shift.length()
        );
    }

    let mut min_e = f32::MAX;
    let mut max_e = f32::MIN;
    let mut sum = 0.0f64;
    let mut count = 0usize;
    let mut unassigned = 0usize;
    for region in &surface.regions {
        if TectonicPlate::plate_of_region(region).is_none() {
            unassigned += 1;
        }
        if let Some(elevation) = region.attributes.elevation() {
            min_e = min_e.min(elevation);
            max_e = max_e.max(elevation);
            sum += elevation as f64;
            count += 1;
        }
    }

    if count > 0 {
        println!(
            "  Elevation: [{:.4}, {:.4}], mean {:.4} ({} of {} regions set)",
            min_e,
            max_e,
            sum / count as f64,
            count,
            surface.region_count()
        );
    } else {
        println!("  Elevation: not computed");
    }
    if unassigned > 0 {
        println!("  Unassigned regions: {}", unassigned);
    }
}

fn run_info(resolution: u32) {
    let regions_per_face = (resolution as u64) * (resolution as u64);
    let total_regions = regions_per_face * 6;

    // Rough per-region footprint: position + neighborhood + attributes.
    let bytes_per_region = std::mem::size_of::<surfacegen::Region>() as u64;
    let total_bytes = total_regions * bytes_per_region;

    println!("Surfacegen - Surface Configuration Info");
    println!("========================================");
    println!();
    println!("Resolution: {}x{} per face", resolution, resolution);
    println!("Total faces: 6");
    println!();
    println!("Region counts:");
    println!("  Per face:  {:>12} regions", regions_per_face);
    println!("  Total:     {:>12} regions", total_regions);
    println!();
    println!(
        "Memory usage (regions): {:>12} bytes ({:.2} MB)",
        total_bytes,
        total_bytes as f64 / 1024.0 / 1024.0
    );
}
