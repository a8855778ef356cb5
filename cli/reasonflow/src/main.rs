//! ReasonFlow CLI: build, validate and visualize reasoning chains.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use reasonflow_observe::ViewFormat;
use tracing::Level;

use config::ReasonflowConfig;

#[derive(Parser)]
#[command(name = "reasonflow", version, about = "Reasoning chain builder and debugger")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Configuration file (default: reasonflow.toml found upward from the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a chain file from a loose JSON chain spec
    Build {
        /// Chain spec JSON
        #[arg(long)]
        input: PathBuf,
        /// Output path (default: <input stem>.chain.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check a chain for structural fallacies
    Validate {
        /// Chain JSON file
        chain: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a chain as a text outline or Mermaid diagram
    Visualize {
        /// Chain JSON file
        chain: PathBuf,
        /// Output format (text, mermaid)
        #[arg(long, default_value = "text")]
        format: String,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Flag steps with validation issues
        #[arg(long)]
        annotate: bool,
        /// Emit the view's JSON projection instead of its text
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, 2) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Run the selected command. `Ok(false)` means the command completed but the
/// process should exit unsuccessfully.
fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Build { input, output } => {
            commands::build::run(&input, output.as_deref())?;
            Ok(true)
        }

        Commands::Validate { chain, json } => commands::validate::run(&chain, json),

        Commands::Visualize {
            chain,
            format,
            output,
            annotate,
            json,
        } => {
            let config = load_config(cli.config)?;
            let export = if json { ViewFormat::Json } else { ViewFormat::Text };
            commands::visualize::run(
                &chain,
                &format,
                export,
                output.as_deref(),
                annotate,
                &config.render,
            )?;
            Ok(true)
        }
    }
}

/// Explicit `--config` must exist; otherwise search upward, falling back to defaults.
fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<ReasonflowConfig> {
    if let Some(path) = explicit {
        return ReasonflowConfig::load(&path);
    }
    let cwd = std::env::current_dir()?;
    Ok(ReasonflowConfig::find_and_load(&cwd)?
        .map(|(config, _)| config)
        .unwrap_or_default())
}
