// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Order snapshots and lifecycle events delivered by the host.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Host order identifier. Numeric or textual depending on the host; echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Numeric(i64),
    /// Any other JSON number (fractional, beyond `i64`), kept as received.
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Numeric(id) => write!(f, "{id}"),
            OrderId::Number(id) => write!(f, "{id}"),
            OrderId::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        OrderId::Numeric(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId::Text(id.to_string())
    }
}

/// Order status code as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(pub i64);

impl OrderStatus {
    pub const PAID: OrderStatus = OrderStatus(1);

    pub fn is_paid(self) -> bool {
        self == Self::PAID
    }
}

/// Read-only snapshot of a host order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    /// Quantity purchased.
    #[serde(default = "default_amount")]
    pub amount: u32,
    pub status: OrderStatus,
}

fn default_amount() -> u32 {
    1
}

/// Whole prices go out as JSON integers (`500`, not `500.0`).
pub fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

/// Lifecycle event published by the host bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderEvent {
    NewOrder { order: Order },
    OrderStatusChanged { order: Order, old_status: OrderStatus },
}

impl OrderEvent {
    pub fn order(&self) -> &Order {
        match self {
            OrderEvent::NewOrder { order } => order,
            OrderEvent::OrderStatusChanged { order, .. } => order,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OrderEvent::NewOrder { .. } => "new_order",
            OrderEvent::OrderStatusChanged { .. } => "order_status_changed",
        }
    }
}
