// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! REST client for the provider's pay endpoint.

use super::TopUpProvider;
use crate::config::ApiTopUpConfig;
use crate::error::TopUpError;
use crate::orders::{serialize_price, Order, OrderId};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Logged when the provider refuses without saying why.
pub const UNKNOWN_PROVIDER_ERROR: &str = "Неизвестная ошибка API";

/// JSON body of the pay call.
#[derive(Debug, Serialize)]
pub struct TopUpRequest<'a> {
    pub api_key: &'a str,
    pub account: &'a str,
    #[serde(serialize_with = "serialize_price")]
    pub amount: f64,
    pub order_id: &'a OrderId,
}

#[derive(Debug, Clone)]
pub struct ProviderClient {
    url: Url,
    api_key: String,
    timeout: Duration,
    client: Client,
}

impl ProviderClient {
    pub fn new(config: &ApiTopUpConfig) -> Result<Self, TopUpError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TopUpError::Initialization(e.to_string()))?;
        Ok(Self { url: config.provider_url.clone(), api_key: config.api_key.clone(), timeout: config.timeout, client })
    }

    pub fn request<'a>(&'a self, account: &'a str, order: &'a Order) -> TopUpRequest<'a> {
        TopUpRequest { api_key: &self.api_key, account, amount: order.price, order_id: &order.id }
    }

    fn transport_error(&self, e: reqwest::Error) -> TopUpError {
        if e.is_timeout() {
            TopUpError::Timeout(self.timeout.as_secs())
        } else {
            TopUpError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl TopUpProvider for ProviderClient {
    async fn top_up(&self, account: &str, order: &Order) -> Result<(), TopUpError> {
        let payload = self.request(account, order);
        debug!("💸 POST {} for order {}", self.url, order.id);

        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        let result = interpret_response(status, &body);
        if result.is_ok() {
            info!("✅ Provider credited {} for order {}", account, order.id);
        }
        result
    }
}

/// Success means HTTP 200 and a truthy `success` field. Bodies that are not a JSON object are malformed.
pub(crate) fn interpret_response(status: StatusCode, body: &str) -> Result<(), TopUpError> {
    let value: Value = serde_json::from_str(body).map_err(|e| TopUpError::MalformedResponse(e.to_string()))?;
    let fields = value
        .as_object()
        .ok_or_else(|| TopUpError::MalformedResponse(format!("expected a JSON object, got {value}")))?;

    if status == StatusCode::OK && fields.get("success").is_some_and(is_truthy) {
        return Ok(());
    }

    let message = match fields.get("error") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => UNKNOWN_PROVIDER_ERROR.to_string(),
        Some(other) => other.to_string(),
    };
    Err(TopUpError::Rejected { status: status.as_u16(), message })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
