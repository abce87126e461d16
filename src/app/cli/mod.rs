//! CLI Adapter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::app::commands::show::{RenderFormat, ShowOptions};
use crate::app::commands::{SourceOptions, check, show};
use crate::domain::{AppError, DEFAULT_PREFIX};

#[derive(Parser)]
#[command(name = "feast-serving-config")]
#[command(version)]
#[command(about = "Validate and inspect feature serving configuration", long_about = None)]
struct Cli {
    /// Log configuration loading details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode the configuration and report the first error
    #[clap(visible_alias = "c")]
    Check {
        #[command(flatten)]
        sources: SourceArgs,
    },
    /// Print the effective configuration with secret options masked
    #[clap(visible_alias = "s")]
    Show {
        #[command(flatten)]
        sources: SourceArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = FormatArg::Yaml)]
        format: FormatArg,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Configuration files (.yml, .yaml, .json, .toml), later files win
    files: Vec<PathBuf>,
    /// Ignore FEAST_* environment variables
    #[arg(long)]
    no_env: bool,
    /// Root key holding the serving settings
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

impl From<SourceArgs> for SourceOptions {
    fn from(args: SourceArgs) -> Self {
        SourceOptions { files: args.files, use_env: !args.no_env, prefix: args.prefix }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
    Toml,
}

impl From<FormatArg> for RenderFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Yaml => RenderFormat::Yaml,
            FormatArg::Json => RenderFormat::Json,
            FormatArg::Toml => RenderFormat::Toml,
        }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Check { sources } => run_check(sources.into()),
        Commands::Show { sources, format } => {
            run_show(ShowOptions { sources: sources.into(), format: format.into() })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber installed by an embedding process takes precedence.
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init().ok();
}

fn run_check(options: SourceOptions) -> Result<(), AppError> {
    let outcome = check::execute(&options)?;
    println!("✅ Configuration is valid ({} source(s))", outcome.sources);
    let config = &outcome.config;
    println!("  Control plane: {}:{}", config.core_host, config.core_port);
    println!(
        "  Online store: {} ({})",
        display_or_unset(&config.store.name),
        display_or_unset(&config.store.store_type)
    );
    println!("  Job store: {}", display_or_unset(&config.jobs.store.store_type));
    println!("  Tracing: {}", if config.tracing.enabled { "enabled" } else { "disabled" });
    Ok(())
}

fn run_show(options: ShowOptions) -> Result<(), AppError> {
    let rendered = show::execute(&options)?;
    print!("{}", rendered);
    Ok(())
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "<unset>" } else { value }
}
