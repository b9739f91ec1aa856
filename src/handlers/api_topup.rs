// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider-backed top-up: credits the account once the order is paid.

use super::{extract_player_id, Plugin};
use crate::config::Messages;
use crate::host::{notify, Host};
use crate::orders::{Order, OrderStatus};
use crate::provider::TopUpProvider;
use crate::telegram::TelegramNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct ApiTopUpHandler {
    category: String,
    provider: Arc<dyn TopUpProvider>,
    messages: Messages,
    alerts: Arc<TelegramNotifier>,
}

impl ApiTopUpHandler {
    pub fn new(
        category: impl Into<String>,
        provider: Arc<dyn TopUpProvider>,
        messages: Messages,
        alerts: Arc<TelegramNotifier>,
    ) -> Self {
        Self { category: category.into(), provider, messages, alerts }
    }

    /// Only the first transition into "paid" of one of our products counts.
    pub fn should_process(&self, order: &Order, old_status: OrderStatus) -> bool {
        order.status.is_paid() && !old_status.is_paid() && order.title.contains(&self.category)
    }

    async fn process_order(&self, host: &dyn Host, order: &Order) {
        let Some(player_id) = extract_player_id(&order.description) else {
            warn!("⚠️ Order {} has no player id in its description", order.id);
            notify(host, &order.id, &self.messages.missing_player_id).await;
            self.alerts.send_message(&format!("⚠️ Order {}: buyer left no login, needs an operator", order.id)).await;
            return;
        };

        match self.provider.top_up(player_id.as_str(), order).await {
            Ok(()) => {
                info!("✅ Order {} topped up via API", order.id);
                notify(host, &order.id, &self.messages.api_success_for(player_id.as_str())).await;
            },
            Err(e) if e.is_provider_reported() => {
                error!("❌ API error for order {}: {}", order.id, e);
                notify(host, &order.id, &self.messages.api_failure).await;
            },
            Err(e) => {
                error!("❌ Top-up call for order {} failed: {}", order.id, e);
                notify(host, &order.id, &self.messages.operator_follow_up).await;
                self.alerts.send_message(&format!("❌ Order {} ({}): {}", order.id, player_id, e)).await;
            },
        }
    }
}

#[async_trait]
impl Plugin for ApiTopUpHandler {
    fn name(&self) -> &str {
        "AutoTopUp"
    }

    fn description(&self) -> &str {
        "Автоматическое пополнение игр через внешнее API"
    }

    async fn on_order_status_changed(&self, host: &dyn Host, order: &Order, old_status: OrderStatus) {
        if !self.should_process(order, old_status) {
            return;
        }
        info!("🧾 Top-up order {} paid, processing...", order.id);
        self.process_order(host, order).await;
    }
}
