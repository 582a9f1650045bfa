#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use identity_admin::cli::{run, Cli};
use identity_admin::config::{config_path, load_config, AdminConfig};
use identity_admin::logging::{init_logging, parse_level, parse_rotation, LogConfig, LOG_FILENAME};
use identity_admin::store::{FileStore, StoreSession};
use tracing::{debug, info};

/// Flags and environment take precedence over the config file
fn log_config(cli: &Cli, config: &AdminConfig) -> LogConfig {
    let defaults = LogConfig::default();
    LogConfig {
        log_dir: cli.log_dir.clone().unwrap_or_else(|| config.log_dir()),
        log_level: cli
            .log_level
            .as_deref()
            .or(config.logging.level.as_deref())
            .map_or(defaults.log_level, parse_level),
        json_format: cli.log_json || config.logging.json.unwrap_or(false),
        rotation: cli
            .log_rotation
            .as_deref()
            .or(config.logging.rotation.as_deref())
            .map_or(defaults.rotation, parse_rotation),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_file = cli.config.clone().unwrap_or_else(config_path);
    let config = load_config(&config_file)?;

    let logging = log_config(&cli, &config);
    let log_file = logging.log_dir.join(LOG_FILENAME);
    if let Err(e) = init_logging(logging) {
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        return Err(e);
    }
    debug!("Using config file {}", config_file.display());

    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());
    let store = FileStore::open(&store_path)
        .await
        .wrap_err_with(|| format!("Failed to open identity store {}", store_path.display()))?;
    info!("Opened identity store {}", store.path().display());

    let session = StoreSession::open(store, cli.command.name());
    run(cli.command, session.store()).await
}
