//! # Main Entry Point
//!
//! Wires the layers together:
//! - Domain: Configuration and Types
//! - Infrastructure: Discord, CoinGecko, Steem
//! - Application: Dispatcher, Router, Outbound queues, Session, Logging
//! - Interface: Command Handlers

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result};
use clap::Parser;
use serenity::all::Http;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::dispatcher::EventDispatcher;
use crate::application::filter::Whitelist;
use crate::application::outbound::Outbox;
use crate::application::router::CommandRouter;
use crate::application::session::SessionState;
use crate::domain::config::{AppConfig, DEFAULT_CONFIG_PATH, DeploymentMode};
use crate::domain::types::MessageKind;
use crate::infrastructure::coingecko::CoinGecko;
use crate::infrastructure::discord::{DiscordHandler, DiscordPlatform};
use crate::infrastructure::steem::SteemClient;

#[derive(Debug, Parser)]
#[command(name = "statbot", version, about = "Discord bot for cryptocurrency prices and Steem")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory for statbot.log
    #[arg(long, default_value = "data")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Logging
    let _log_guard = application::logging::init(&cli.log_dir)?;

    // 2. Configuration
    let config = AppConfig::load(&cli.config)?;
    let mode = DeploymentMode::from_env();
    tracing::info!(
        "{}",
        strings::logs::starting(&config.bot.version, &mode.to_string())
    );

    // 3. Infrastructure
    let token = config.services.discord.resolve_token()?;
    let http = Arc::new(Http::new(&token));
    let api_client = infrastructure::http_client(&config.apis)?;
    let market = Arc::new(CoinGecko::new(api_client.clone(), &config.apis.coingecko_url));
    let steem = Arc::new(SteemClient::new(api_client, &config.apis.steem_url));

    // 4. Outbound queues and their workers
    let outbox = Outbox::start(Arc::new(DiscordPlatform::new(http)), &config.dispatch);

    // 5. Routing
    let router = Arc::new(CommandRouter::new(interface::commands::default_table(
        market,
        steem,
        &config.bot.version,
    )?));
    let specs = router.table().specs();
    let aliases: usize = specs.iter().map(|s| s.aliases.len()).sum();
    tracing::info!("{}", strings::logs::routing_table(specs.len(), aliases));

    let whitelist = Whitelist::new(config.bot.whitelist.iter().copied());
    if whitelist.is_empty() {
        tracing::warn!("{}", strings::logs::EMPTY_WHITELIST);
    } else {
        tracing::info!("{}", strings::logs::whitelist_loaded(whitelist.len()));
    }

    let dispatcher = Arc::new(EventDispatcher::new(
        whitelist,
        router,
        SessionState::new(),
        outbox.embeds(),
        outbox.texts(),
        &config.dispatch,
    ));

    // 6. Gateway
    let handler = DiscordHandler::new(dispatcher, config.bot.status.clone());
    let mut client = serenity::Client::builder(&token, infrastructure::discord::intents())
        .event_handler(handler)
        .await
        .context("Failed to create Discord client")?;

    match mode {
        DeploymentMode::Development => {
            let shard_manager = client.shard_manager.clone();
            tracing::info!("{}", strings::logs::PRESS_CTRL_C);
            tokio::select! {
                result = client.start() => result.context("Discord client stopped")?,
                signal = shutdown_signal() => {
                    if let Err(e) = signal {
                        tracing::warn!("{}", strings::logs::shutdown_fail(&e.to_string()));
                    }
                    tracing::info!("{}", strings::logs::SHUTDOWN);
                    shard_manager.shutdown_all().await;
                }
            }
        }
        DeploymentMode::Production => {
            client.start().await.context("Discord client stopped")?;
        }
    }

    for kind in [MessageKind::Embed, MessageKind::Plain] {
        let state = outbox.state(kind);
        tracing::debug!("{}", strings::logs::queue_state(&kind.to_string(), &state.to_string()));
    }
    let (embeds, texts) = outbox.shutdown().await?;
    tracing::info!(
        "{}",
        strings::logs::drained(embeds.delivered, embeds.failed, texts.delivered, texts.failed)
    );
    Ok(())
}

async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        signal(SignalKind::terminate())?.recv().await;
        Ok::<(), std::io::Error>(())
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<std::io::Result<()>>();

    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        result = terminate => result,
    }
}
