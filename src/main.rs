use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kpalette::models::{AppConfig, InitMethod, OutputFormat, Overrides, CONFIG_ENV};
use kpalette::services::{PaletteEntry, QuantizePipeline};

#[derive(Parser)]
#[command(name = "kpalette")]
#[command(about = "Reduce an image to K representative colors with k-means")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize an image and write the result as PNG
    Quantize {
        /// Input image (PNG, JPEG, GIF, BMP or TIFF)
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Number of colors (falls back to clustering.k from the config)
        k: Option<usize>,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// PNG flavour to write
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Re-compress the output with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// Print the K-color palette of an image
    Palette {
        /// Input image (PNG, JPEG, GIF, BMP or TIFF)
        input: PathBuf,

        /// Number of colors (falls back to clustering.k from the config)
        k: Option<usize>,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// Print the palette as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ClusterArgs {
    /// Maximum Lloyd iterations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Seed for centroid initialization (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Initial centroid policy
    #[arg(long, value_enum)]
    init: Option<InitMethod>,

    /// Independent runs; the lowest inertia wins
    #[arg(long)]
    restarts: Option<usize>,

    /// Run on the calling thread only
    #[arg(long)]
    single_threaded: bool,

    /// YAML config file (defaults to $KPALETTE_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ClusterArgs {
    fn overrides(&self, k: Option<usize>) -> Overrides {
        Overrides {
            k,
            max_iterations: self.max_iterations,
            seed: self.seed,
            initialization: self.init,
            restarts: self.restarts,
            single_threaded: self.single_threaded,
            ..Default::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Quantize {
            input,
            output,
            k,
            cluster,
            format,
            optimize,
        }) => {
            init_logging();
            let overrides = Overrides {
                format,
                optimize,
                ..cluster.overrides(k)
            };
            run_quantize_command(&input, &output, &cluster, &overrides)
        }
        Some(Commands::Palette {
            input,
            k,
            cluster,
            json,
        }) => {
            init_logging();
            run_palette_command(&input, &cluster, &cluster.overrides(k), json)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout stays clean for `palette --json`
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kpalette=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_pipeline(cluster: &ClusterArgs, overrides: &Overrides) -> anyhow::Result<QuantizePipeline> {
    let config = AppConfig::discover(cluster.config.as_deref()).context("Failed to load configuration")?;
    let settings = config.resolve(overrides)?;
    Ok(QuantizePipeline::new(settings))
}

fn run_quantize_command(
    input: &Path,
    output: &Path,
    cluster: &ClusterArgs,
    overrides: &Overrides,
) -> anyhow::Result<()> {
    let pipeline = load_pipeline(cluster, overrides)?;
    let result = pipeline
        .run_file(input, output)
        .with_context(|| format!("Failed to quantize {}", input.display()))?;

    println!(
        "Quantized {} ({}x{}) to {} colors in {} iterations{}, wrote {} ({} bytes)",
        input.display(),
        result.width,
        result.height,
        result.palette.len(),
        result.report.iterations,
        if result.report.converged { "" } else { " (not converged)" },
        output.display(),
        result.png_bytes.len()
    );

    Ok(())
}

fn run_palette_command(
    input: &Path,
    cluster: &ClusterArgs,
    overrides: &Overrides,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = load_pipeline(cluster, overrides)?;
    let bytes = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let summary = pipeline
        .analyze(&bytes)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.entries)?);
    } else {
        println!(
            "{} ({}x{}), seed {}, {} iterations:",
            input.display(),
            summary.width,
            summary.height,
            summary.report.seed,
            summary.report.iterations
        );
        for entry in &summary.entries {
            print_entry(entry);
        }
    }

    Ok(())
}

fn print_entry(entry: &PaletteEntry) {
    println!(
        "  {:>3}  {}  {:>10} px  {:>6.2}%",
        entry.index,
        entry.hex,
        entry.pixels,
        entry.share * 100.0
    );
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();

    println!("kpalette v{VERSION} - k-means color quantization\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nUsage:");
    println!("  kpalette quantize <INPUT> <OUTPUT> [K]   Quantize an image to K colors");
    println!("  kpalette palette <INPUT> [K] [--json]    Print the K-color palette");
    println!("\nRun 'kpalette --help' for all options.");
}
