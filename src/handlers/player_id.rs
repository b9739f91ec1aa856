// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Player identifier extraction from free-text order data.

use std::fmt;

/// Account/login the buyer wants credited. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim the text the buyer typed into the order form. No structural validation.
pub fn extract_player_id(text: &str) -> Option<PlayerId> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PlayerId(trimmed.to_string()))
    }
}
