// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Webhook server receiving order events from the Cardinal host bridge.

use crate::handlers::PluginRegistry;
use crate::host::Host;
use crate::orders::OrderEvent;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Header carrying the shared secret.
pub const TOKEN_HEADER: &str = "x-cardinal-token";

/// Webhook server state.
pub struct WebhookState {
    pub security_token: String,
    pub registry: PluginRegistry,
    pub host: Arc<dyn Host>,
}

pub fn router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route("/events", post(handle_event))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Start the webhook server on all interfaces.
pub async fn start_webhook_server(port: u16, state: Arc<WebhookState>) -> Result<(), String> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    serve(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, state: Arc<WebhookState>) -> Result<(), String> {
    if let Ok(addr) = listener.local_addr() {
        info!("🌐 Webhook server listening on {}", addr);
    }
    axum::serve(listener, router(state)).await.map_err(|e| format!("Server error: {}", e))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn handle_event(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    // Authenticate before looking at the body.
    let token = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()).unwrap_or("");
    if token != state.security_token {
        warn!("Invalid security token");
        return StatusCode::UNAUTHORIZED;
    }

    let event: OrderEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Rejected malformed event: {}", e);
            return StatusCode::UNPROCESSABLE_ENTITY;
        },
    };

    debug!("Received {} for order {}", event.kind(), event.order().id);
    state.registry.dispatch(state.host.as_ref(), &event).await;
    StatusCode::OK
}
