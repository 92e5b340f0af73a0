//! Main CLI application for the constraint puzzle runner

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use constraint_puzzles::{
    config::{CliOverrides, OutputFormat, Settings},
    puzzles::Puzzle,
    run_puzzles,
    utils::{ColorOutput, ReportFormatter},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "constraint-puzzles")]
#[command(about = "Integer constraint puzzles solved with CaDiCaL")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run puzzles and print their reports
    Run {
        /// Puzzle to run (repeatable; all puzzles when omitted)
        #[arg(short, long = "puzzle")]
        puzzles: Vec<Puzzle>,

        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Seed for random sampling (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Integer bit width (overrides config)
        #[arg(short, long)]
        bit_width: Option<u32>,

        /// Per-check timeout in seconds (overrides config)
        #[arg(short, long)]
        timeout: Option<f32>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the available puzzles
    List,

    /// Create example configuration files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            puzzles,
            config,
            format,
            seed,
            bit_width,
            timeout,
            verbose,
        } => {
            init_tracing(verbose)?;
            let overrides = CliOverrides {
                bit_width,
                seed,
                timeout_seconds: timeout,
                format: format.map(OutputFormat::from),
            };
            run_command(config, &puzzles, overrides, verbose).await
        }
        Commands::List => {
            println!("{}", ReportFormatter::format_puzzle_list());
            Ok(())
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Log to stderr; `RUST_LOG` selects levels, `--verbose` adds debug events
fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("constraint_puzzles={}", level)))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

async fn run_command(
    config_path: PathBuf,
    puzzles: &[Puzzle],
    overrides: CliOverrides,
    verbose: bool,
) -> Result<()> {
    // Load configuration
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        if verbose {
            eprintln!(
                "{}",
                ColorOutput::warning(&format!(
                    "Config file {} not found, using defaults",
                    config_path.display()
                ))
            );
        }
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;

    if verbose {
        eprintln!("Configuration:");
        eprintln!("  Preset: {}", settings.solver.preset.as_str());
        eprintln!("  Bit width: {}", settings.encoding.bit_width);
        eprintln!("  Seed: {:?}", settings.sampling.seed);
        eprintln!("  Timeout: {:?}", settings.timeout());
        eprintln!();
    }

    let start_time = Instant::now();
    let reports = run_puzzles(&settings, puzzles)
        .await
        .context("Failed to run puzzles")?;
    let total_time = start_time.elapsed();

    let rendered = ReportFormatter::render(&reports, settings.output.format)
        .context("Failed to render reports")?;
    println!("{}", rendered);

    if settings.output.format == OutputFormat::Text {
        println!("\n{}", ReportFormatter::format_summary(&reports));
        let solved = reports.iter().filter(|r| r.is_solved()).count();
        let message = format!(
            "{}/{} puzzles solved in {:.3}s",
            solved,
            reports.len(),
            total_time.as_secs_f64()
        );
        if solved == reports.len() {
            println!("{}", ColorOutput::success(&message));
        } else {
            println!("{}", ColorOutput::warning(&message));
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up configuration..."));

    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    // Create default configuration
    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    // Example variants
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut seeded = Settings::default();
    seeded.sampling.seed = Some(42);
    seeded.to_file(&examples_dir.join("seeded.yaml"))?;

    let mut bounded = Settings::default();
    bounded.solver.timeout_seconds = Some(5.0);
    bounded.encoding.bit_width = 8;
    bounded.output.format = OutputFormat::Json;
    bounded.to_file(&examples_dir.join("bounded.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}
