//! foxden — season ledger CLI.
//!
//! # Usage
//!
//! ```text
//! foxden serve --port 8080
//! foxden create --name Nibbles --image fox.png
//! foxden feed fox-abc123-19a2b3c
//! foxden show fox-abc123-19a2b3c
//! foxden list --season 2026-08
//! foxden inspect 2026-08
//! foxden providers --output provider-status.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "foxden",
    about = "Foxden — append-only season ledger for fox profiles and feed events",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "foxden.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8080")]
        port: u16,
    },
    /// Create a fox: append a profile record to the current season.
    Create {
        /// Display name of the fox.
        #[arg(long)]
        name: String,
        /// Path to the profile image file.
        #[arg(long)]
        image: PathBuf,
        /// Owner address; defaults to the configured app owner.
        #[arg(long)]
        owner: Option<String>,
    },
    /// Feed a fox: append a feed event to the current season.
    Feed {
        fox_id: String,
        /// Owner address; defaults to the configured app owner.
        #[arg(long)]
        owner: Option<String>,
        /// Credits delta recorded with the event.
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        credits_delta: i64,
    },
    /// Show a fox's current state, replayed from its season records.
    Show {
        fox_id: String,
        /// Season to read (YYYY-MM); defaults to the current month.
        #[arg(long)]
        season: Option<String>,
    },
    /// List the foxes of a season.
    List {
        /// Season to read (YYYY-MM); defaults to the current month.
        #[arg(long)]
        season: Option<String>,
    },
    /// Dump a season container's raw records.
    Inspect {
        /// Season to inspect (YYYY-MM).
        season: String,
    },
    /// Probe the configured storage providers.
    Providers {
        /// Also write the JSON report to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,foxden=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve { port } => commands::serve::serve(config, port).await,
        Commands::Create { name, image, owner } => {
            commands::create::create(config, &name, &image, owner.as_deref()).await
        }
        Commands::Feed {
            fox_id,
            owner,
            credits_delta,
        } => commands::feed::feed(config, &fox_id, owner.as_deref(), credits_delta).await,
        Commands::Show { fox_id, season } => {
            commands::show::show(config, &fox_id, season.as_deref()).await
        }
        Commands::List { season } => commands::list::list(config, season.as_deref()).await,
        Commands::Inspect { season } => commands::inspect::inspect(config, &season).await,
        Commands::Providers { output } => {
            commands::providers::providers(config, output.as_deref()).await
        }
    }
}
