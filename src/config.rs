// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration module - loads settings from environment variables.

use crate::browser::ProductCatalog;
use crate::error::ConfigError;
use reqwest::Url;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_API_CATEGORY: &str = "Пополнение Steam";
const DEFAULT_BROWSER_MARKER: &str = "Пополнение";
const DEFAULT_SITE_URL: &str = "https://official-game-topup.com";
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Main configuration for the top-up service.
#[derive(Debug, Clone)]
pub struct Config {
    // Host bridge, only needed by `serve`
    pub cardinal_message_url: Option<Url>,
    pub webhook_token: Option<String>,
    pub webhook_port: u16,

    // Handlers
    pub api_topup: Option<ApiTopUpConfig>,
    pub browser_topup: Option<BrowserTopUpConfig>,

    // Operator alerts
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,

    pub messages: Messages,
}

/// Settings for the provider-backed handler.
#[derive(Debug, Clone)]
pub struct ApiTopUpConfig {
    /// Orders whose title contains this are ours.
    pub category: String,
    pub provider_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

/// Settings for the browser-driven handler.
#[derive(Debug, Clone)]
pub struct BrowserTopUpConfig {
    pub title_marker: String,
    pub site_url: Url,
    pub webdriver_url: Url,
    pub verify_delay: Duration,
    pub catalog: ProductCatalog,
}

/// Buyer-facing reply templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// `{account}` is replaced with the credited player id.
    pub api_success: String,
    pub api_failure: String,
    pub browser_success: String,
    /// Sent whenever the call itself failed and a human has to look at the order.
    pub operator_follow_up: String,
    pub missing_player_id: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            api_success: "Баланс {account} успешно пополнен. Пожалуйста, подтвердите заказ!".to_string(),
            api_failure: "Произошла временная ошибка при пополнении. Мы скоро все исправим!".to_string(),
            browser_success: "Ваш заказ успешно выполнен!".to_string(),
            operator_follow_up: "Произошла ошибка при пополнении. Скоро подойдет оператор.".to_string(),
            missing_player_id: "Ошибка: Не удалось определить логин. Свяжитесь с продавцом.".to_string(),
        }
    }
}

impl Messages {
    pub fn api_success_for(&self, account: &str) -> String {
        self.api_success.replace("{account}", account)
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where F: Fn(&str) -> Option<String> {
        let vars = Vars { lookup: move |name: &str| lookup(name).filter(|v| !v.trim().is_empty()) };

        let api_topup = if vars.parse_or("API_TOPUP_ENABLED", true)? {
            Some(ApiTopUpConfig {
                category: vars.var_or("API_TOPUP_CATEGORY", DEFAULT_API_CATEGORY),
                provider_url: parse_url("PROVIDER_URL", &vars.var("PROVIDER_URL")?)?,
                api_key: vars.var("PROVIDER_API_KEY")?,
                timeout: positive_secs("PROVIDER_TIMEOUT_SECS", vars.parse_or("PROVIDER_TIMEOUT_SECS", 10u64)?)?,
            })
        } else {
            None
        };

        let browser_topup = if vars.parse_or("BROWSER_TOPUP_ENABLED", false)? {
            let catalog = ProductCatalog::parse(&vars.var("TOPUP_PRODUCTS")?)?;
            Some(BrowserTopUpConfig {
                title_marker: vars.var_or("BROWSER_TOPUP_MARKER", DEFAULT_BROWSER_MARKER),
                site_url: parse_url("TOPUP_SITE_URL", &vars.var_or("TOPUP_SITE_URL", DEFAULT_SITE_URL))?,
                webdriver_url: parse_url("WEBDRIVER_URL", &vars.var_or("WEBDRIVER_URL", DEFAULT_WEBDRIVER_URL))?,
                verify_delay: Duration::from_millis(vars.parse_or("TOPUP_VERIFY_DELAY_MS", 2000u64)?),
                catalog,
            })
        } else {
            None
        };

        Ok(Self {
            cardinal_message_url: (vars.lookup)("CARDINAL_MESSAGE_URL")
                .map(|url| parse_url("CARDINAL_MESSAGE_URL", &url))
                .transpose()?,
            webhook_token: (vars.lookup)("CARDINAL_WEBHOOK_TOKEN"),
            webhook_port: vars.parse_or("WEBHOOK_PORT", 8088u16)?,
            api_topup,
            browser_topup,
            telegram_token: (vars.lookup)("TELEGRAM_BOT_TOKEN"),
            telegram_chat_id: (vars.lookup)("TELEGRAM_CHAT_ID"),
            messages: Messages::default(),
        })
    }

    /// Host bridge settings: message callback URL and ingress token.
    pub fn bridge(&self) -> Result<(&Url, &str), ConfigError> {
        let url = self
            .cardinal_message_url
            .as_ref()
            .ok_or_else(|| ConfigError::Missing("CARDINAL_MESSAGE_URL".to_string()))?;
        let token = self
            .webhook_token
            .as_deref()
            .ok_or_else(|| ConfigError::Missing("CARDINAL_WEBHOOK_TOKEN".to_string()))?;
        Ok((url, token))
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn var(&self, name: &str) -> Result<String, ConfigError> {
        (self.lookup)(name).ok_or_else(|| ConfigError::Missing(name.to_string()))
    }

    fn var_or(&self, name: &str, default: &str) -> String {
        (self.lookup)(name).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match (self.lookup)(name) {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::invalid(name, e)),
            None => Ok(default),
        }
    }
}

fn positive_secs(name: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::invalid(name, "must be positive"));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_url(name: &str, s: &str) -> Result<Url, ConfigError> {
    Url::parse(s.trim()).map_err(|e| ConfigError::invalid(name, format!("{s}: {e}")))
}
