// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, StatusCode},
    routing::post,
    Json, Router,
};
use cardinal_topup::config::ApiTopUpConfig;
use cardinal_topup::{Host, HostError, Order, OrderId, OrderStatus};
use reqwest::Url;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// Host that records every message instead of delivering it.
#[derive(Default)]
pub struct RecordingHost {
    sent: Mutex<Vec<(OrderId, String)>>,
}

impl RecordingHost {
    pub fn messages(&self) -> Vec<(OrderId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Host for RecordingHost {
    async fn send_message(&self, order_id: &OrderId, text: &str) -> Result<(), HostError> {
        self.sent.lock().unwrap().push((order_id.clone(), text.to_string()));
        Ok(())
    }
}

/// Canned provider answer.
#[derive(Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl MockReply {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body: body.to_string(), delay: Duration::ZERO }
    }
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    received: Arc<Mutex<Vec<Value>>>,
}

/// In-process provider endpoint. Returns its address and the bodies it received.
pub async fn spawn_provider(reply: MockReply) -> (SocketAddr, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState { reply, received: Arc::clone(&received) };
    let app = Router::new().route("/v1/pay", post(pay)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, received)
}

async fn pay(State(state): State<MockState>, Json(body): Json<Value>) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.received.lock().unwrap().push(body);
    tokio::time::sleep(state.reply.delay).await;
    (state.reply.status, [(header::CONTENT_TYPE, "application/json")], state.reply.body.clone())
}

pub fn api_config(addr: SocketAddr, timeout: Duration) -> ApiTopUpConfig {
    ApiTopUpConfig {
        category: "Пополнение Steam".to_string(),
        provider_url: Url::parse(&format!("http://{addr}/v1/pay")).unwrap(),
        api_key: "test-key".to_string(),
        timeout,
    }
}

pub fn steam_order(description: &str) -> Order {
    Order {
        id: OrderId::Numeric(42),
        title: "Пополнение Steam".to_string(),
        description: description.to_string(),
        price: 500.0,
        amount: 1,
        status: OrderStatus::PAID,
    }
}
