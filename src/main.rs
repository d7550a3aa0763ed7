//! Gores CLI - cut an equirectangular image into sinusoidal globe gores.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use gores::split::{GoreLayout, DEFAULT_DEGREE_STEP};
use gores::{GoreConfig, Pipeline};

/// Sinusoidal globe gore generator.
#[derive(Parser)]
#[command(name = "gores")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter directive (e.g. "gores=debug"). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split, project and merge an image.
    Run {
        /// Source image (PNG, JPEG).
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for raw and projected gores.
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,

        /// Path of the merged output image.
        #[arg(short, long)]
        output_image: Option<PathBuf>,

        /// Degrees of longitude per gore.
        #[arg(short = 's', long)]
        degree_step: Option<u32>,

        /// Rows above and below the center row that get gap repair.
        #[arg(long)]
        band_rows: Option<u32>,

        /// Columns searched on each side of a gap.
        #[arg(long)]
        window_radius: Option<u32>,

        /// Project gores in parallel.
        #[arg(long)]
        parallel: bool,

        /// JSON configuration file; flags given on the command line take precedence.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the gore layout for an image without processing it.
    Info {
        /// Source image (only the header is read).
        #[arg(short, long)]
        input: PathBuf,

        /// Degrees of longitude per gore.
        #[arg(short = 's', long, default_value_t = DEFAULT_DEGREE_STEP)]
        degree_step: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Run {
            input,
            output_dir,
            output_image,
            degree_step,
            band_rows,
            window_radius,
            parallel,
            config,
        } => {
            let mut cfg = match config {
                Some(path) => GoreConfig::from_json_file(&path).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }),
                None => GoreConfig::default(),
            };
            if let Some(v) = input {
                cfg.input = v;
            }
            if let Some(v) = output_dir {
                cfg.output_dir = v;
            }
            if let Some(v) = output_image {
                cfg.output_image = v;
            }
            if let Some(v) = degree_step {
                cfg.degree_step = v;
            }
            if let Some(v) = band_rows {
                cfg.repair.band_rows = v;
            }
            if let Some(v) = window_radius {
                cfg.repair.window_radius = v;
            }
            cfg.parallel |= parallel;

            run_gores(cfg);
        }
        Commands::Info { input, degree_step } => {
            run_info(input, degree_step);
        }
    }
}

fn init_logging(directive: Option<&str>) {
    let directive = directive.unwrap_or("gores=info");
    let filter = match directive.parse() {
        Ok(d) => EnvFilter::from_default_env().add_directive(d),
        Err(e) => {
            eprintln!("Warning: ignoring log directive '{}': {}", directive, e);
            EnvFilter::from_default_env()
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_gores(config: GoreConfig) {
    config.validate().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("Gores - Sinusoidal Globe Gore Generator");
    println!("=======================================");
    println!("Input: {}", config.input.display());
    println!("Output directory: {}", config.output_dir.display());
    println!("Output image: {}", config.output_image.display());
    println!("Degree step: {} ({} gores)", config.degree_step, 360 / config.degree_step);
    println!(
        "Repair band: ±{} rows, window ±{} columns",
        config.repair.band_rows, config.repair.window_radius
    );

    let start = Instant::now();
    let pipeline = Pipeline::standard(config);

    let run = pipeline
        .run_with_callbacks(
            |name, i, total| {
                println!("  [{}/{}] Starting: {}", i + 1, total, name);
            },
            |name, i, total| {
                println!("  [{}/{}] Completed: {}", i + 1, total, name);
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    println!("\nWrote {} files in {:.2?}", run.written.len(), start.elapsed());
    println!("Merged image saved to {}", pipeline.config().output_image.display());
    println!("Done!");
}

fn run_info(input: PathBuf, degree_step: u32) {
    let (width, height) = image::image_dimensions(&input).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", input.display(), e);
        std::process::exit(1);
    });
    let layout = GoreLayout::new(width, degree_step).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    println!("Gores - Layout Info");
    println!("===================");
    println!();
    println!("Source: {} ({}x{})", input.display(), width, height);
    println!("Degree step: {}", degree_step);
    println!("Gores: {}", layout.gore_count);
    println!("Gore width: {} px (last: {} px)", layout.gore_width, layout.last_gore_width());
    println!();
    println!("  {:>5}  {:>13}  {:>11}", "gore", "columns", "longitude");
    for range in layout.ranges() {
        println!(
            "  {:>5}  {:>6}..{:<5}  {:>4}°..{:<4}°",
            range.index, range.x_start, range.x_end, range.lon_start_deg, range.lon_end_deg
        );
    }
}
