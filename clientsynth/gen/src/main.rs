//! Clientsynth CLI
//!
//! Synthesizes REST client method bodies from a package description.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clientsynth_gen::config::SynthConfig;
use clientsynth_gen::errors::GeneratorError;
use clientsynth_gen::output::{OutputFormat, generate_and_write, load_package};
use colored::Colorize;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// Clientsynth - synthesizes REST client method bodies as an intermediate representation
#[derive(Parser, Debug)]
#[command(name = "clientsynth")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Package description (.json, .yaml or .yml)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file; prints to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Naming configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print output without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), GeneratorError> {
    let config = match &cli.config {
        Some(path) => SynthConfig::load(path)?,
        None => SynthConfig::default(),
    };
    debug!(?config, "loaded configuration");

    let package = load_package(&cli.input)?;
    let rendered = generate_and_write(
        &package,
        &config.naming,
        cli.format,
        cli.output.as_deref(),
        cli.dry_run,
    )?;

    match &cli.output {
        Some(path) if !cli.dry_run => {
            if cli.verbose > 0 {
                eprintln!(
                    "{} {} methods to {}",
                    "Synthesized".green().bold(),
                    package.method_count(),
                    path.display()
                );
            }
        }
        _ => print!("{rendered}"),
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
