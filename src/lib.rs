// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cardinal top-up handlers: fulfill game balance orders through a provider API or the game's site.

pub mod browser;
pub mod config;
pub mod error;
pub mod handlers;
pub mod host;
pub mod ingress;
pub mod orders;
pub mod provider;
pub mod telegram;

pub use config::Config;
pub use error::{AutomationError, ConfigError, HostError, TopUpError};
pub use handlers::{Plugin, PluginRegistry};
pub use host::{CardinalBridge, Host};
pub use orders::{Order, OrderEvent, OrderId, OrderStatus};
