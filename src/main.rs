use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use flatmate_match::config::Settings;
use flatmate_match::services::{MatchService, PostgresProfileStore, ServiceError};
use flatmate_match::{Matcher, ProfileRecord};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Flatmate compatibility matching
#[derive(Parser, Debug)]
#[command(name = "flatmate-match")]
#[command(about = "Rank compatible flatmates from stored profiles", long_about = None)]
struct Args {
    /// Path to a configuration file (defaults to config/default.toml + config/local.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find ranked matches for a profile owner
    Matches {
        owner_id: String,

        /// Maximum number of matches to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of k-means clusters
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Inspect or write stored profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    /// Print an owner's stored profile
    Show { owner_id: String },

    /// Create or replace a profile from a JSON file
    Save { path: PathBuf },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    init_logging(&settings.logging.level, &settings.logging.format);
    info!("Configuration loaded successfully");

    let mut match_config = settings.match_config();
    if let Command::Matches { limit, k, .. } = &args.command {
        if limit.is_some() {
            match_config.max_results = *limit;
        }
        if let Some(k) = k {
            match_config.k = *k;
        }
    }
    let matcher = Matcher::new(match_config).map_err(ServiceError::from)?;

    info!("Matcher initialized with config: {:?}", matcher.config());

    let store = PostgresProfileStore::from_settings(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(ServiceError::from)?;

    let service = MatchService::new(store, matcher);

    let output = match args.command {
        Command::Matches { owner_id, .. } => {
            serde_json::to_string_pretty(&service.find_matches(&owner_id).await?)?
        }
        Command::Profile { action: ProfileAction::Show { owner_id } } => {
            serde_json::to_string_pretty(&service.get_profile(&owner_id).await?)?
        }
        Command::Profile { action: ProfileAction::Save { path } } => {
            let raw = std::fs::read_to_string(&path)
                .map_err(|source| CliError::Read { path: path.clone(), source })?;
            let record: ProfileRecord = serde_json::from_str(&raw)?;
            serde_json::to_string_pretty(&service.save_profile(&record).await?)?
        }
    };

    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
