use anyhow::Result;
use clap::{Parser, Subcommand};
use devcost::commands::{self, OutputOptions, UsageOverrides};
use devcost::config::{self, Config, LOCAL_CONFIG_FILE};
use devcost::exit_codes::exit_code_for_anyhow;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "devcost")]
#[command(
    about = "Estimate monthly AWS developer tooling costs",
    long_about = "devcost estimates monthly costs for AWS developer tooling from usage figures.\n\nServices:\n  - CodeCommit, CodePipeline, CodeGuru\n  - CodeBuild, CodeArtifact, CodeDeploy\n\nFeatures:\n  - Free-tier aware pricing with configurable rates\n  - Side-by-side comparison of named environments\n  - Text, JSON, CSV and HTML output"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DEVCOST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate monthly costs for one usage scenario
    Estimate {
        /// Start from a configured environment instead of the defaults
        #[arg(short, long)]
        environment: Option<String>,
        #[command(flatten)]
        usage: UsageOverrides,
        /// Show how each service is priced
        #[arg(long)]
        explain: bool,
        /// Export format (csv, html, json)
        #[arg(long)]
        export: Option<String>,
        /// Export output file (stdout if omitted)
        #[arg(long, requires = "export")]
        export_file: Option<PathBuf>,
    },
    /// Compare monthly costs across environments
    Compare {
        /// Environments to compare (default: all configured)
        #[arg(short, long, value_delimiter = ',')]
        environments: Vec<String>,
        /// Show how each service is priced
        #[arg(long)]
        explain: bool,
        /// Export format (csv, html, json)
        #[arg(long)]
        export: Option<String>,
        /// Export output file (stdout if omitted)
        #[arg(long, requires = "export")]
        export_file: Option<PathBuf>,
    },
    /// Show the effective price table
    Rates,
    /// Initialize a configuration file
    Init {
        /// Path of the config file to write
        #[arg(short, long, default_value = LOCAL_CONFIG_FILE)]
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Setup logging - only warnings and errors unless --verbose
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("DEVCOST_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {:#}", err);
        std::process::exit(exit_code_for_anyhow(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    // Loaded per command so `init` works even when the existing config is broken
    let load_config = || Config::load(cli.config.as_deref());

    match cli.command {
        Commands::Estimate {
            environment,
            usage,
            explain,
            export,
            export_file,
        } => {
            let options = OutputOptions {
                output: cli.output,
                export,
                export_file,
                explain,
            };
            let config = load_config()?;
            commands::estimate(&config, environment.as_deref(), &usage, &options)?;
        }
        Commands::Compare {
            environments,
            explain,
            export,
            export_file,
        } => {
            let options = OutputOptions {
                output: cli.output,
                export,
                export_file,
                explain,
            };
            let config = load_config()?;
            commands::compare(&config, &environments, &options)?;
        }
        Commands::Rates => {
            commands::rates(&load_config()?, &cli.output)?;
        }
        Commands::Init { file } => {
            config::init_config(&file)?;
        }
    }

    Ok(())
}
