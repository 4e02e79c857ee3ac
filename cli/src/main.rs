//! Microdon CLI
//!
//! Loads a seed file describing a small network and prints feeds, profiles
//! and the user list. Output goes to stdout, logs to stderr.

mod commands;
mod config;
mod seed;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Config;
use seed::Seed;

#[derive(Parser)]
#[command(name = "microdon")]
#[command(about = "Browse Microdon news feeds built from a seed file")]
#[command(version)]
struct Cli {
    /// Seed file (defaults to MICRODON_SEED, then seed.json)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a user's news feed, newest first
    Feed {
        /// User name
        name: String,

        /// Posts to show (defaults to MICRODON_PAGE_SIZE, then 20)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print a user's profile
    Profile {
        /// User name
        name: String,
    },

    /// List every user
    Users,
}

fn main() -> Result<()> {
    // Logs to stderr so stdout stays clean for the rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,microdon_core=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let seed_path = cli.seed.unwrap_or(config.seed_path);
    tracing::info!(path = %seed_path.display(), "Loading seed");
    let mut network = Seed::load(&seed_path)?.build(Utc::now())?;

    let output = match cli.command {
        Commands::Feed { name, limit } => {
            commands::feed(&mut network, &name, limit.unwrap_or(config.page_size))?
        }
        Commands::Profile { name } => commands::profile(&network, &name)?,
        Commands::Users => commands::users(&network),
    };

    print!("{}", output);
    Ok(())
}
