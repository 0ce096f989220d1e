//! codeharvest - materialize code blocks from assistant responses
//!
//! Thin command-line front end over the library pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codeharvest::{
    config::HarvestConfig, pipeline::Conversation, workspace::ActionRecord, Harvester, ProjectRef,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "codeharvest")]
#[command(version)]
#[command(about = "Materialize code blocks from assistant responses into a project workspace")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "CODEHARVEST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a single assistant response
    Apply {
        /// Owning user
        #[arg(short, long)]
        user: String,

        /// Project name
        #[arg(short, long)]
        project: String,

        /// Response file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Replay every assistant message of a JSON history
    Replay {
        /// Owning user
        #[arg(short, long)]
        user: String,

        /// Project name
        #[arg(short, long)]
        project: String,

        /// History file (`{"messages": [...]}`)
        #[arg(long)]
        history: PathBuf,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("codeharvest={}", log_level).into()),
        )
        .with(
            cli.json_logs
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!cli.json_logs)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Apply {
            user,
            project,
            input,
        } => {
            let project = ProjectRef::new(user, project)?;
            let text = read_input(input.as_deref())?;
            let actions = Harvester::new(config).process_response(&text, &project)?;
            print_actions(&actions);
        }
        Commands::Replay {
            user,
            project,
            history,
        } => {
            let project = ProjectRef::new(user, project)?;
            let json = std::fs::read_to_string(&history)
                .with_context(|| format!("failed to read history {}", history.display()))?;
            let conversation = Conversation::from_json(&json)?;
            let actions = Harvester::new(config).replay(&conversation, &project)?;
            print_actions(&actions);
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

/// Explicit path first, then the default location if present, then defaults.
fn load_config(path: Option<&Path>) -> Result<HarvestConfig> {
    if let Some(path) = path {
        return Ok(HarvestConfig::load(path)?);
    }

    let default_path = HarvestConfig::default_path();
    if default_path.exists() {
        tracing::debug!(path = %default_path.display(), "Loading default config");
        Ok(HarvestConfig::load(&default_path)?)
    } else {
        Ok(HarvestConfig::default())
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read response {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read response from stdin")?;
            Ok(text)
        }
    }
}

fn print_actions(actions: &[ActionRecord]) {
    for action in actions {
        println!("{}", action);
    }
}

fn show_config(config: Option<&HarvestConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    let toml = toml::to_string_pretty(&config)?;
    println!("{}", toml);
    Ok(())
}
