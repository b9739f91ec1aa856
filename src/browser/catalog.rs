// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Amount → product control lookup for the top-up site.

use crate::error::ConfigError;
use std::collections::BTreeMap;

/// Maps an order amount to the CSS selector of the matching product control on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCatalog {
    products: BTreeMap<u32, String>,
}

impl ProductCatalog {
    /// Parse `amount=selector` entries separated by `;`, e.g. `100=button#p100;500=button#p500`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut products = BTreeMap::new();
        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (amount, selector) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::Catalog(format!("'{entry}' is not amount=selector")))?;
            let amount: u32 = amount
                .trim()
                .parse()
                .map_err(|e| ConfigError::Catalog(format!("bad amount in '{entry}': {e}")))?;
            let selector = selector.trim();
            if amount == 0 {
                return Err(ConfigError::Catalog(format!("zero amount in '{entry}'")));
            }
            if selector.is_empty() {
                return Err(ConfigError::Catalog(format!("empty selector for amount {amount}")));
            }
            if products.insert(amount, selector.to_string()).is_some() {
                return Err(ConfigError::Catalog(format!("amount {amount} listed twice")));
            }
        }
        if products.is_empty() {
            return Err(ConfigError::Catalog("no products".to_string()));
        }
        Ok(Self { products })
    }

    pub fn selector_for(&self, amount: u32) -> Option<&str> {
        self.products.get(&amount).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn amounts(&self) -> impl Iterator<Item = u32> + '_ {
        self.products.keys().copied()
    }
}
