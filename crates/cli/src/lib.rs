pub mod bootstrap;
pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ecopack_core::config::{ConfigOverrides, LoadOptions, LogFormat, LoggingConfig};
use ecopack_core::ScoringStrategyKind;
use tracing_subscriber::EnvFilter;

use crate::commands::recommend::PayloadSource;

#[derive(Debug, Parser)]
#[command(
    name = "ecopack",
    about = "EcoPack packaging recommendation CLI",
    long_about = "Rank packaging materials for a product by sustainability, cost and CO2, and \
                  inspect the catalog and configuration the engine runs with.",
    after_help = "Examples:\n  ecopack recommend --input product.json\n  \
                  cat product.json | ecopack recommend --input -\n  \
                  ecopack recommend --payload '{\"product_name\":\"Jar\",...}' --top 3\n  \
                  ecopack catalog\n  ecopack config"
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "PATH", help = "Config file to load")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank catalog materials for one product request (JSON)")]
    Recommend {
        #[arg(
            long,
            value_name = "PATH",
            conflicts_with = "payload",
            required_unless_present = "payload",
            help = "Read the product request from a file, or `-` for stdin"
        )]
        input: Option<PathBuf>,
        #[arg(long, value_name = "JSON", help = "Product request given inline")]
        payload: Option<String>,
        #[arg(long, value_name = "NAME", help = "feasibility_weighted | category_weighted")]
        strategy: Option<ScoringStrategyKind>,
        #[arg(long, value_name = "N", help = "Keep only the best N materials")]
        top: Option<usize>,
    },
    #[command(about = "Print the effective material catalog as JSON")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Report readiness with catalog size and scoring strategy")]
    Health,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let result = execute(cli);

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

pub fn execute(cli: Cli) -> commands::CommandResult {
    let mut options = LoadOptions {
        require_file: cli.config.is_some(),
        config_path: cli.config,
        ..LoadOptions::default()
    };

    match cli.command {
        Command::Recommend { input, payload, strategy, top } => {
            options.overrides = ConfigOverrides {
                strategy,
                max_results: top,
                ..ConfigOverrides::default()
            };
            let source = match (input, payload) {
                (_, Some(inline)) => PayloadSource::Inline(inline),
                (Some(path), None) if path.as_os_str() == "-" => PayloadSource::Stdin,
                (Some(path), None) => PayloadSource::File(path),
                (None, None) => PayloadSource::Stdin,
            };
            commands::recommend::run(options, source)
        }
        Command::Catalog => commands::catalog::run(options),
        Command::Config => commands::config::run(options),
        Command::Health => commands::health::run(options),
    }
}

/// Installs the global subscriber on stderr so stdout only carries command
/// output. A second call is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
