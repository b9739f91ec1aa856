// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Browser-driven top-up: buys the product on the game's site from the shop balance.

use super::{extract_player_id, Plugin};
use crate::browser::{ProductCatalog, TopUpSite};
use crate::config::Messages;
use crate::error::AutomationError;
use crate::host::{notify, Host};
use crate::orders::Order;
use crate::telegram::TelegramNotifier;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct BrowserTopUpHandler {
    title_marker: String,
    catalog: ProductCatalog,
    site: Arc<dyn TopUpSite>,
    messages: Messages,
    alerts: Arc<TelegramNotifier>,
}

impl BrowserTopUpHandler {
    pub fn new(
        title_marker: impl Into<String>,
        catalog: ProductCatalog,
        site: Arc<dyn TopUpSite>,
        messages: Messages,
        alerts: Arc<TelegramNotifier>,
    ) -> Self {
        Self { title_marker: title_marker.into(), catalog, site, messages, alerts }
    }

    async fn run(&self, player_id: &str, amount: u32) -> Result<(), AutomationError> {
        let selector = self.catalog.selector_for(amount).ok_or(AutomationError::UnknownProduct(amount))?;
        self.site.purchase(player_id, selector).await
    }
}

#[async_trait]
impl Plugin for BrowserTopUpHandler {
    fn name(&self) -> &str {
        "BrowserTopUp"
    }

    fn description(&self) -> &str {
        "Автоматическое пополнение через сайт игры"
    }

    fn on_start(&self) {
        info!("🔌 Plugin {} started ({} products)", self.name(), self.catalog.len());
    }

    async fn on_new_order(&self, host: &dyn Host, order: &Order) {
        if !order.title.contains(&self.title_marker) {
            return;
        }
        info!("🆕 New order {}! Processing...", order.id);

        let Some(player_id) = extract_player_id(&order.description) else {
            warn!("⚠️ Order {} has no player id in its description", order.id);
            notify(host, &order.id, &self.messages.missing_player_id).await;
            self.alerts.send_message(&format!("⚠️ Order {}: buyer left no player id, needs an operator", order.id)).await;
            return;
        };

        match self.run(player_id.as_str(), order.amount).await {
            Ok(()) => {
                info!("✅ Order {} fulfilled in browser", order.id);
                notify(host, &order.id, &self.messages.browser_success).await;
            },
            Err(e) => {
                error!("❌ Automation failed for order {}: {}", order.id, e);
                notify(host, &order.id, &self.messages.operator_follow_up).await;
                self.alerts.send_message(&format!("❌ Order {} ({}): {}", order.id, player_id, e)).await;
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handlers::test_support::{order, RecordingHost};
    use crate::orders::{OrderEvent, OrderId, OrderStatus};
    use std::sync::Mutex;

    struct FakeSite {
        purchases: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl FakeSite {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self { purchases: Mutex::new(Vec::new()), fail })
        }
    }

    #[async_trait]
    impl TopUpSite for FakeSite {
        async fn purchase(&self, player_id: &str, product_selector: &str) -> Result<(), AutomationError> {
            self.purchases.lock().unwrap().push((player_id.to_string(), product_selector.to_string()));
            if self.fail {
                Err(AutomationError::Step { step: "pay from balance", reason: "element not found".to_string() })
            } else {
                Ok(())
            }
        }
    }

    fn handler(site: Arc<FakeSite>) -> BrowserTopUpHandler {
        let catalog = ProductCatalog::parse("100=button#diamonds_100;500=button#diamonds_500").unwrap();
        BrowserTopUpHandler::new("Пополнение", catalog, site, Messages::default(), Arc::new(TelegramNotifier::disabled()))
    }

    #[tokio::test]
    async fn ignores_orders_without_marker() {
        let site = FakeSite::new(false);
        let host = RecordingHost::default();
        handler(site.clone()).on_new_order(&host, &order("Аккаунт", "12345678", 0)).await;
        assert!(site.purchases.lock().unwrap().is_empty());
        assert!(host.messages().is_empty());
    }

    #[tokio::test]
    async fn buys_catalog_product_and_confirms() {
        let site = FakeSite::new(false);
        let host = RecordingHost::default();
        handler(site.clone()).on_new_order(&host, &order("Пополнение алмазов", " 12345678 ", 0)).await;
        assert_eq!(
            *site.purchases.lock().unwrap(),
            vec![("12345678".to_string(), "button#diamonds_100".to_string())]
        );
        assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().browser_success)]);
    }

    #[tokio::test]
    async fn automation_failure_promises_an_operator() {
        let site = FakeSite::new(true);
        let host = RecordingHost::default();
        handler(site).on_new_order(&host, &order("Пополнение алмазов", "12345678", 0)).await;
        assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().operator_follow_up)]);
    }

    #[tokio::test]
    async fn unknown_amount_never_opens_a_session() {
        let site = FakeSite::new(false);
        let host = RecordingHost::default();
        let mut o = order("Пополнение алмазов", "12345678", 0);
        o.amount = 250;
        handler(site.clone()).on_new_order(&host, &o).await;
        assert!(site.purchases.lock().unwrap().is_empty());
        assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().operator_follow_up)]);
    }

    #[tokio::test]
    async fn missing_player_id_escalates() {
        let site = FakeSite::new(false);
        let host = RecordingHost::default();
        handler(site.clone()).on_new_order(&host, &order("Пополнение алмазов", "", 0)).await;
        assert!(site.purchases.lock().unwrap().is_empty());
        assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().missing_player_id)]);
    }

    #[tokio::test]
    async fn status_changes_are_not_ours() {
        let site = FakeSite::new(false);
        let host = RecordingHost::default();
        let mut registry = crate::handlers::PluginRegistry::new();
        registry.register(Arc::new(handler(site.clone())));
        let event = OrderEvent::OrderStatusChanged { order: order("Пополнение", "123", 1), old_status: OrderStatus(0) };
        registry.dispatch(&host, &event).await;
        assert!(site.purchases.lock().unwrap().is_empty());
    }
}
