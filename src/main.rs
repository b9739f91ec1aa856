// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cardinal Top-Up - fulfills game balance orders for the Cardinal host.

use anyhow::Context;
use async_trait::async_trait;
use cardinal_topup::ingress::{self, WebhookState};
use cardinal_topup::telegram::TelegramNotifier;
use cardinal_topup::{CardinalBridge, Config, Host, HostError, OrderEvent, OrderId, PluginRegistry};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "cardinal-topup", version, about = "Top-up handlers for Cardinal orders")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Receive host events over the webhook (default)
    Serve,
    /// Load and validate the configuration, then exit
    CheckConfig,
    /// Run one event JSON file through the handlers, printing buyer messages
    Replay { path: PathBuf },
}

/// Prints buyer messages instead of delivering them.
struct StdoutHost;

#[async_trait]
impl Host for StdoutHost {
    async fn send_message(&self, order_id: &OrderId, text: &str) -> Result<(), HostError> {
        println!("[{order_id}] {text}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load config: {}", e);
        e
    })?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::CheckConfig => check_config(&config),
        Command::Replay { path } => replay(&config, &path).await,
        Command::Serve => serve(config).await,
    }
}

fn check_config(config: &Config) -> anyhow::Result<()> {
    info!("✅ Configuration is valid");
    match config.bridge() {
        Ok((url, _)) => info!("📡 Host messages: {}", url),
        Err(e) => warn!("📡 Host bridge not configured ({}); only `replay` will work", e),
    }
    info!("🌐 Webhook port: {}", config.webhook_port);
    match &config.api_topup {
        Some(api) => info!(
            "💸 API top-up: category '{}', provider {}, timeout {}s",
            api.category,
            api.provider_url,
            api.timeout.as_secs()
        ),
        None => info!("💸 API top-up: disabled"),
    }
    match &config.browser_topup {
        Some(browser) => info!(
            "🛒 Browser top-up: marker '{}', site {}, webdriver {}, amounts {:?}",
            browser.title_marker,
            browser.site_url,
            browser.webdriver_url,
            browser.catalog.amounts().collect::<Vec<_>>()
        ),
        None => info!("🛒 Browser top-up: disabled"),
    }
    Ok(())
}

async fn replay(config: &Config, path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let event: OrderEvent = serde_json::from_str(&raw).with_context(|| format!("Invalid event in {}", path.display()))?;

    let registry = PluginRegistry::from_config(config, Arc::new(TelegramNotifier::disabled()))?;
    registry.start();
    info!("🧪 Replaying {} for order {}", event.kind(), event.order().id);
    registry.dispatch(&StdoutHost, &event).await;
    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("🚀 Cardinal Top-Up starting...");

    let telegram = Arc::new(TelegramNotifier::new(config.telegram_token.clone(), config.telegram_chat_id.clone()));
    let registry = PluginRegistry::from_config(&config, Arc::clone(&telegram))?;
    if registry.is_empty() {
        anyhow::bail!("No handlers enabled; set API_TOPUP_ENABLED or BROWSER_TOPUP_ENABLED");
    }
    registry.start();

    let (message_url, webhook_token) = config.bridge()?;
    let host = Arc::new(CardinalBridge::new(message_url.clone())?);
    let state = Arc::new(WebhookState { security_token: webhook_token.to_string(), registry, host });

    telegram.send_message("🚀 Cardinal Top-Up launching...").await;
    info!("✅ Ready! Waiting for orders...");

    tokio::select! {
        result = ingress::start_webhook_server(config.webhook_port, state) => {
            result.map_err(anyhow::Error::msg)?;
        }
        _ = signal::ctrl_c() => {
            info!("🛑 Shutdown signal received");
            telegram.send_message("🛑 Cardinal Top-Up shutting down...").await;
        }
    }

    Ok(())
}
