// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outbound messaging through the Cardinal host.

use crate::error::HostError;
use crate::orders::OrderId;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

/// Messaging surface the host offers to plugins.
#[async_trait]
pub trait Host: Send + Sync {
    /// Post `text` into the chat attached to the order.
    async fn send_message(&self, order_id: &OrderId, text: &str) -> Result<(), HostError>;
}

/// Send a buyer message without caring about delivery. Failures are only logged.
pub async fn notify(host: &dyn Host, order_id: &OrderId, text: &str) {
    match host.send_message(order_id, text).await {
        Ok(()) => debug!("📤 Sent message for order {}", order_id),
        Err(e) => error!("Failed to send message for order {}: {}", order_id, e),
    }
}

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    order_id: &'a OrderId,
    text: &'a str,
}

/// Host reached over HTTP: messages are POSTed to the bridge's callback URL.
#[derive(Debug, Clone)]
pub struct CardinalBridge {
    url: Url,
    client: Client,
}

impl CardinalBridge {
    pub fn new(url: Url) -> Result<Self, HostError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HostError::Transport(e.to_string()))?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl Host for CardinalBridge {
    async fn send_message(&self, order_id: &OrderId, text: &str) -> Result<(), HostError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&OutgoingMessage { order_id, text })
            .send()
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(HostError::Refused(response.status().as_u16()))
        }
    }
}
