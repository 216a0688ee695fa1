//! Telegram Bot API dispatcher.
//!
//! Sends a formatted notification to every configured admin chat in one concurrent fan-out and
//! aggregates the per-recipient outcomes. An unconfigured bot (no token or no admin chats) is a
//! valid state: dispatch is skipped, not failed. Nothing is ever retried.

pub mod format;

use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use log::*;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use vertex_common::Secret;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum TelegramApiError {
    #[error("Could not initialize the Telegram client. {0}")]
    Initialization(String),
}

/// The result of one `sendMessage` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub chat_id: i64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchStats {
    pub total_admins: usize,
    pub successful: usize,
    pub failed: usize,
}

impl DispatchStats {
    pub fn from_outcomes(outcomes: &[SendOutcome]) -> Self {
        let successful = outcomes.iter().filter(|o| o.success).count();
        Self { total_admins: outcomes.len(), successful, failed: outcomes.len() - successful }
    }
}

/// The aggregated result of one dispatch: per-admin outcomes, the optional user confirmation
/// outcome, and the overall verdict (`success` iff at least one admin send went through).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub success: bool,
    pub skipped: bool,
    pub stats: DispatchStats,
    pub admin_results: Vec<SendOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_result: Option<SendOutcome>,
}

impl DispatchReport {
    pub fn skipped() -> Self {
        Self {
            success: false,
            skipped: true,
            stats: DispatchStats::default(),
            admin_results: Vec::new(),
            client_result: None,
        }
    }
}

#[derive(Clone)]
pub struct TelegramApi {
    /// Full `sendMessage` URL; empty when no token was configured. Kept secret because the URL
    /// embeds the bot token.
    send_url: Secret,
    admin_chat_ids: Vec<i64>,
    client: Arc<Client>,
}

impl TelegramApi {
    pub fn new(token: Secret, admin_chat_ids: Vec<i64>) -> Result<Self, TelegramApiError> {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| TelegramApiError::Initialization(e.to_string()))?;
        let send_url = if token.is_empty() {
            Secret::default()
        } else {
            Secret::new(format!("{TELEGRAM_API_BASE}/bot{}/sendMessage", token.reveal()))
        };
        Ok(Self { send_url, admin_chat_ids, client: Arc::new(client) })
    }

    pub fn is_configured(&self) -> bool {
        !self.send_url.is_empty() && !self.admin_chat_ids.is_empty()
    }

    pub fn admin_count(&self) -> usize {
        self.admin_chat_ids.len()
    }

    /// Fan the admin notification out to every configured chat, then (after the batch settles)
    /// optionally confirm to the submitting user. Individual failures are reported in the
    /// outcomes; they never cancel the other sends.
    pub async fn send_to_all(&self, admin_text: &str, user: Option<(i64, String)>) -> DispatchReport {
        if !self.is_configured() {
            warn!("⚠️ Telegram is not configured; skipping notification dispatch");
            return DispatchReport::skipped();
        }
        let sends = self.admin_chat_ids.iter().map(|&chat_id| self.send_message(chat_id, admin_text));
        let admin_results = join_all(sends).await;
        let stats = DispatchStats::from_outcomes(&admin_results);
        if stats.failed > 0 {
            warn!("📨 {}/{} admin notifications failed", stats.failed, stats.total_admins);
        }
        let client_result = match user {
            Some((chat_id, text)) => Some(self.send_message(chat_id, &text).await),
            None => None,
        };
        DispatchReport { success: stats.successful > 0, skipped: false, stats, admin_results, client_result }
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> SendOutcome {
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });
        match self.client.post(self.send_url.reveal()).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                let message_id =
                    response.json::<SendMessageResponse>().await.ok().and_then(|r| r.result).map(|m| m.message_id);
                debug!("📨 Notification delivered to chat {chat_id}");
                SendOutcome { chat_id, success: true, message_id, error: None }
            },
            Ok(response) => {
                let status = response.status();
                let description = response
                    .json::<SendMessageResponse>()
                    .await
                    .ok()
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| status.to_string());
                error!("📨 Telegram rejected the message for chat {chat_id}: {description}");
                SendOutcome { chat_id, success: false, message_id: None, error: Some(description) }
            },
            Err(e) => {
                error!("📨 Could not reach the Telegram API for chat {chat_id}: {e}");
                SendOutcome { chat_id, success: false, message_id: None, error: Some(e.to_string()) }
            },
        }
    }
}

#[derive(Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    result: Option<SentMessage>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct SentMessage {
    message_id: i64,
}
