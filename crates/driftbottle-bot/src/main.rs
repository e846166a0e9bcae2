//! Drift bottle bot.
//!
//! Users throw text messages into a shared pool ("扔漂流瓶…") and pick a
//! uniformly random unclaimed one back out ("捡漂流瓶"). Bottles live in a
//! local SQLite store; display names come best-effort from a OneBot v11
//! gateway, which also pushes the incoming message events to this process
//! over HTTP.
//!
//! # Usage
//!
//! ```bash
//! driftbottle-bot [config.toml]
//! ```
//!
//! Without an argument, `driftbottle.toml` in the working directory is used
//! when present; `DRIFTBOTTLE_*` environment variables override either.

mod commands;
mod config;
mod dispatcher;
mod event;
mod logging;
mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use driftbottle_core::BottleService;
use driftbottle_gateway::OneBotHttpClient;
use driftbottle_store::SqliteBottleStore;

use crate::commands::CommandMatcher;
use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;
use crate::server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = BotConfig::load(config_path.as_deref())?;
    logging::init(&config.logging);

    let store = Arc::new(SqliteBottleStore::open(&config.storage.db_path)?);
    let gateway = Arc::new(OneBotHttpClient::new(
        &config.gateway.address,
        config.gateway.port,
        config.gateway.access_token.clone(),
    ));
    info!(
        gateway = %format!("{}:{}", config.gateway.address, config.gateway.port),
        db = %config.storage.db_path.display(),
        "starting drift bottle bot"
    );

    let service = BottleService::new(store, gateway.clone());
    let dispatcher = Dispatcher::new(CommandMatcher::new(&config.commands), service);

    let state = Arc::new(AppState { dispatcher, gateway });
    server::run(&config.server, state).await?;

    Ok(())
}
