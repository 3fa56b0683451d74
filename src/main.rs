//! notify-rank - Notification Domain Priority Ranking
//!
//! Command-line entry point: train the priority model, rank domains, manage
//! per-domain settings, or run the HTTP API.

mod cli;

use clap::{Parser, Subcommand};
use cli::config::ConfigAction;
use cli::settings::SettingsAction;
use notify_rank::{error::Result, RankConfig};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "notify-rank")]
#[command(about = "Rank notification domains by predicted importance", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "NOTIFY_RANK_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory (overrides storage.data_dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model on the dataset and persist the weights
    Train {
        /// Dataset file (defaults to the configured dataset)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Number of epochs
        #[arg(long)]
        epochs: Option<usize>,

        /// Initial learning rate
        #[arg(long)]
        learning_rate: Option<f64>,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Rank the dataset's domains by priority
    Predict {
        /// Dataset file (defaults to the configured dataset)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Model blend weight in [0, 1]
        #[arg(short, long)]
        alpha: Option<f64>,

        /// Show per-domain scores
        #[arg(long)]
        scores: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Server address (overrides server.addr)
        #[arg(long)]
        addr: Option<String>,
    },

    /// Clear all domain settings and delete the trained model
    Reset,

    /// Per-domain notification settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info for this crate, debug with --verbose
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "notify_rank={},tower_http=warn",
            level.as_str().to_lowercase()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("notify-rank v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = RankConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    match cli.command {
        Commands::Train {
            dataset,
            epochs,
            learning_rate,
            seed,
        } => {
            if let Some(epochs) = epochs {
                config.training.epochs = epochs;
            }
            if let Some(learning_rate) = learning_rate {
                config.training.learning_rate = learning_rate;
            }
            if let Some(seed) = seed {
                config.training.seed = seed;
            }
            cli::train::handle(&config, dataset).await
        }
        Commands::Predict {
            dataset,
            alpha,
            scores,
        } => cli::predict::handle(&config, dataset, alpha, scores).await,
        Commands::Serve { addr } => cli::serve::handle(config, addr).await,
        Commands::Reset => cli::reset::handle(&config).await,
        Commands::Settings { action } => cli::settings::handle(&config, action).await,
        Commands::Config { action } => cli::config::handle(&config, action).await,
    }
}
