// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error types shared by the top-up handlers.

use thiserror::Error;

/// Configuration could not be loaded or failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(String),
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },
    #[error("Invalid product catalog: {0}")]
    Catalog(String),
}

impl ConfigError {
    pub fn invalid(name: &str, reason: impl ToString) -> Self {
        Self::Invalid { name: name.to_string(), reason: reason.to_string() }
    }
}

/// Outcome of a provider call that did not credit the account.
#[derive(Debug, Error)]
pub enum TopUpError {
    #[error("Could not initialize provider client: {0}")]
    Initialization(String),
    #[error("Provider unreachable: {0}")]
    Network(String),
    #[error("Provider did not answer within {0}s")]
    Timeout(u64),
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("Provider rejected top-up (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl TopUpError {
    /// Whether the provider answered with a well-formed refusal, as opposed to the call itself failing.
    pub fn is_provider_reported(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// A browser automation step failed.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("Could not start browser session: {0}")]
    Session(String),
    #[error("Step '{step}' failed: {reason}")]
    Step { step: &'static str, reason: String },
    #[error("No product configured for amount {0}")]
    UnknownProduct(u32),
}

/// The host messaging call failed.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Could not reach host: {0}")]
    Transport(String),
    #[error("Host refused message (HTTP {0})")]
    Refused(u16),
}
