use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tces_models::ProjectHints;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tces", about = "Trade-Coordinated Estimate System")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/tces.toml")]
    config: String,

    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Produce a coordinated multi-trade estimate
    Estimate {
        /// Free-text project description
        description: String,

        /// Read ProjectHints JSON from a file
        #[arg(long)]
        hints: Option<String>,

        /// Include the analysis and per-trade status and errors
        #[arg(long)]
        detailed: bool,
    },
    /// Show the project analysis and planned trade requests without dispatching
    Analyze {
        /// Free-text project description
        description: String,

        /// Read ProjectHints JSON from a file
        #[arg(long)]
        hints: Option<String>,
    },
}

fn read_hints(path: Option<&str>) -> Result<ProjectHints> {
    let Some(path) = path else {
        return Ok(ProjectHints::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read hints: {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse hints JSON: {path}"))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let output = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = tces::load_config(&cli.config)?;
    let coordinator = tces::build_coordinator(&config).context("Failed to build coordinator")?;

    match cli.command {
        Command::Estimate {
            description,
            hints,
            detailed,
        } => {
            let hints = read_hints(hints.as_deref())?;
            if detailed {
                let report = coordinator
                    .coordinate_detailed(&description, &hints)
                    .await
                    .map_err(|e| anyhow::anyhow!("Estimate failed: {e}"))?;
                print_json(&report, cli.pretty)?;
            } else {
                let response = tces::coordinate(&coordinator, &description, &hints)
                    .await
                    .map_err(|e| anyhow::anyhow!("Estimate failed: {e}"))?;
                print_json(&response, cli.pretty)?;
            }
        }
        Command::Analyze { description, hints } => {
            let hints = read_hints(hints.as_deref())?;
            let plan = coordinator
                .plan(&description, &hints)
                .map_err(|e| anyhow::anyhow!("Analysis failed: {e}"))?;
            print_json(&plan, cli.pretty)?;
        }
    }

    Ok(())
}
