use std::{path::PathBuf, process::exit, sync::Arc, time::Duration};

use clap::Parser;
use compact_str::{format_compact, ToCompactString};
use tracing::info;

use crate::{
    client::{ApiConfig, StatusApi, StatusPoller},
    config::{default_config_path, Credentials, HomewatchConfig},
    logging::{init_logging, LoggingConfig},
    notifier::TelegramNotifier,
    result::{HomewatchError, Result},
};

mod client;
mod config;
mod domain;
mod logging;
mod notifier;
mod result;

/// A Telegram bot for watching homework review statuses
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Alternate path to the configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the path to the configuration file and exit.
    #[arg(short, long)]
    print_config_path: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(default_config_path);

    if args.print_config_path {
        println!("{}", config_path.display());
        exit(0);
    }

    let config = if config_path.exists() {
        confy::load_path(&config_path)
            .map_err(|e| HomewatchError::ConfigError(e.to_compact_string()))?
    } else {
        HomewatchConfig::default()
    };
    let config = config.with_env_overrides();
    config
        .validate()
        .map_err(|e| HomewatchError::ConfigError(e.into()))?;

    // Credentials are checked before anything touches the network.
    let credentials = Credentials::from_env()?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        HomewatchError::GeneralError(format_compact!("failed to create runtime: {e}"))
    })?;

    rt.block_on(run(config, credentials))
}

async fn run(config: HomewatchConfig, credentials: Credentials) -> Result<()> {
    color_eyre::install().expect("failed to install color_eyre");

    let _log_guard = init_logging(LoggingConfig::from_env(&config)).map_err(|e| {
        HomewatchError::GeneralError(format_compact!("failed to initialize logging: {e}"))
    })?;
    info!(version = env!("CARGO_PKG_VERSION"), "homewatch starting up");

    let api = StatusApi::new(ApiConfig::new(
        config.endpoint.as_str(),
        credentials.practicum_token.clone(),
    ))?;
    let notifier = TelegramNotifier::new(
        credentials.telegram_token.clone(),
        credentials.telegram_chat_id.clone(),
    )?;

    let poller = StatusPoller::new(
        Arc::new(api),
        Arc::new(notifier),
        Duration::from_secs(config.poll_interval_secs),
    );

    let shutdown = poller.shutdown_sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(());
        }
    });

    poller.start().await
}
