// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handler modules for processing host order events.

pub mod api_topup;
pub mod browser_topup;
pub mod player_id;

pub use api_topup::ApiTopUpHandler;
pub use browser_topup::BrowserTopUpHandler;
pub use player_id::{extract_player_id, PlayerId};

use crate::browser::WebDriverSite;
use crate::config::Config;
use crate::error::TopUpError;
use crate::host::Host;
use crate::orders::{Order, OrderEvent, OrderStatus};
use crate::provider::ProviderClient;
use crate::telegram::TelegramNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// An order event subscriber. Every hook defaults to a no-op.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn on_start(&self) {
        info!("🔌 Plugin {} started", self.name());
    }

    async fn on_new_order(&self, _host: &dyn Host, _order: &Order) {}

    async fn on_order_status_changed(&self, _host: &dyn Host, _order: &Order, _old_status: OrderStatus) {}
}

/// Enabled plugins, dispatched in registration order.
#[derive(Default, Clone)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every handler enabled in `config`.
    pub fn from_config(config: &Config, alerts: Arc<TelegramNotifier>) -> Result<Self, TopUpError> {
        let mut registry = Self::new();
        if let Some(api) = &config.api_topup {
            let provider = Arc::new(ProviderClient::new(api)?);
            registry.register(Arc::new(ApiTopUpHandler::new(
                api.category.clone(),
                provider,
                config.messages.clone(),
                Arc::clone(&alerts),
            )));
        }
        if let Some(browser) = &config.browser_topup {
            let site = Arc::new(WebDriverSite::new(browser));
            registry.register(Arc::new(BrowserTopUpHandler::new(
                browser.title_marker.clone(),
                browser.catalog.clone(),
                site,
                config.messages.clone(),
                Arc::clone(&alerts),
            )));
        }
        Ok(registry)
    }

    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> &mut Self {
        info!("🔌 Registered plugin {}: {}", plugin.name(), plugin.description());
        self.plugins.push(plugin);
        self
    }

    pub fn start(&self) {
        for plugin in &self.plugins {
            plugin.on_start();
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every plugin's hook for `event` to completion.
    pub async fn dispatch(&self, host: &dyn Host, event: &OrderEvent) {
        debug!("📬️ Dispatching {} for order {}", event.kind(), event.order().id);
        for plugin in &self.plugins {
            match event {
                OrderEvent::NewOrder { order } => plugin.on_new_order(host, order).await,
                OrderEvent::OrderStatusChanged { order, old_status } => {
                    plugin.on_order_status_changed(host, order, *old_status).await
                },
            }
        }
    }
}
