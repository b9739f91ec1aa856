// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Headless browser session driven through a W3C WebDriver server.

use super::TopUpSite;
use crate::config::BrowserTopUpConfig;
use crate::error::AutomationError;
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_ID_INPUT: &str = "input#user_id";
const CHECK_USER_BUTTON: &str = "button#check_user";
const PAY_FROM_BALANCE_BUTTON: &str = "button#pay_from_balance";

/// Top-up site reached through a WebDriver server (chromedriver, geckodriver, selenium).
#[derive(Debug, Clone)]
pub struct WebDriverSite {
    webdriver_url: Url,
    site_url: Url,
    verify_delay: Duration,
}

impl WebDriverSite {
    pub fn new(config: &BrowserTopUpConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            site_url: config.site_url.clone(),
            verify_delay: config.verify_delay,
        }
    }

    async fn open_session(&self) -> Result<Client, AutomationError> {
        let mut caps = Capabilities::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            serde_json::json!({ "args": ["--headless=new", "--no-sandbox", "--disable-gpu"] }),
        );
        caps.insert("moz:firefoxOptions".to_string(), serde_json::json!({ "args": ["-headless"] }));

        ClientBuilder::native()
            .capabilities(caps)
            .connect(self.webdriver_url.as_str())
            .await
            .map_err(|e| AutomationError::Session(e.to_string()))
    }

    async fn run_purchase(&self, client: &Client, player_id: &str, product_selector: &str) -> Result<(), AutomationError> {
        client.goto(self.site_url.as_str()).await.map_err(step("open page"))?;

        client
            .find(Locator::Css(USER_ID_INPUT))
            .await
            .map_err(step("find user id field"))?
            .send_keys(player_id)
            .await
            .map_err(step("enter user id"))?;
        click(client, CHECK_USER_BUTTON, "check user").await?;

        // The site verifies the nickname asynchronously.
        tokio::time::sleep(self.verify_delay).await;

        click(client, product_selector, "select product").await?;
        click(client, PAY_FROM_BALANCE_BUTTON, "pay from balance").await?;
        Ok(())
    }
}

#[async_trait]
impl TopUpSite for WebDriverSite {
    async fn purchase(&self, player_id: &str, product_selector: &str) -> Result<(), AutomationError> {
        debug!("🌐 Opening browser session via {}", self.webdriver_url);
        let client = self.open_session().await?;

        let result = self.run_purchase(&client, player_id, product_selector).await;

        if let Err(e) = client.close().await {
            warn!("⚠️ Failed to close browser session: {}", e);
        } else {
            debug!("🌐 Browser session closed");
        }

        if result.is_ok() {
            info!("🛒 Paid {} for player {} from balance", product_selector, player_id);
        }
        result
    }
}

async fn click(client: &Client, selector: &str, name: &'static str) -> Result<(), AutomationError> {
    client.find(Locator::Css(selector)).await.map_err(step(name))?.click().await.map_err(step(name))
}

fn step(step: &'static str) -> impl Fn(CmdError) -> AutomationError {
    move |e| AutomationError::Step { step, reason: e.to_string() }
}
