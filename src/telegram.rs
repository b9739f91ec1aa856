// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Telegram notifier for operator alerts.

use teloxide::prelude::*;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Option<Bot>,
    chat_id: Option<ChatId>,
}

impl TelegramNotifier {
    pub fn new(token: Option<String>, chat_id: Option<String>) -> Self {
        info!(
            "📱 Initializing Telegram alerts: token={}, chat_id={}",
            token.as_ref().map(|_| "SET").unwrap_or("NONE"),
            chat_id.as_ref().map(|_| "SET").unwrap_or("NONE")
        );

        let bot = token.map(Bot::new);
        let chat_id = chat_id.and_then(|id| match id.trim().parse::<i64>() {
            Ok(num) => Some(ChatId(num)),
            Err(_) => {
                warn!("TELEGRAM_CHAT_ID {} is not numeric, alerts disabled", id);
                None
            },
        });

        Self { bot, chat_id }
    }

    /// Notifier that drops every alert.
    pub fn disabled() -> Self {
        Self { bot: None, chat_id: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.bot.is_some() && self.chat_id.is_some()
    }

    pub async fn send_message(&self, message: &str) {
        if let (Some(bot), Some(chat_id)) = (&self.bot, &self.chat_id) {
            match bot.send_message(*chat_id, message).await {
                Ok(_) => info!("📤 Sent Telegram alert"),
                Err(e) => error!("Failed to send Telegram alert: {}", e),
            }
        }
    }
}
