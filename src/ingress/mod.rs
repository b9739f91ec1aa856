// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Host event ingress.

pub mod webhook;

pub use webhook::{router, serve, start_webhook_server, WebhookState, TOKEN_HEADER};
