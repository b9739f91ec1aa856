// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Browser automation against the top-up web page.

pub mod catalog;
pub mod webdriver;

pub use catalog::ProductCatalog;
pub use webdriver::WebDriverSite;

use crate::error::AutomationError;
use async_trait::async_trait;

/// A top-up site that can credit a player from the shop's own balance.
#[async_trait]
pub trait TopUpSite: Send + Sync {
    /// Run one purchase: look the player up, pick the product, pay from balance.
    async fn purchase(&self, player_id: &str, product_selector: &str) -> Result<(), AutomationError>;
}
