// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Payment provider integration.

mod client;

pub use client::{ProviderClient, TopUpRequest, UNKNOWN_PROVIDER_ERROR};

use crate::error::TopUpError;
use crate::orders::Order;
use async_trait::async_trait;

/// Something that can credit `account` for a paid order.
#[async_trait]
pub trait TopUpProvider: Send + Sync {
    async fn top_up(&self, account: &str, order: &Order) -> Result<(), TopUpError>;
}
