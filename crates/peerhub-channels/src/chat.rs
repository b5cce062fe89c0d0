//! Telegram Bot API chat notifier.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use peerhub_core::config::delivery::ChatConfig;
use peerhub_core::error::AppError;
use peerhub_core::result::AppResult;
use peerhub_core::traits::channel::ChatNotifier;
use peerhub_core::types::delivery::TransactionSummary;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Chat notifier sending Markdown messages through the Bot API.
#[derive(Debug)]
pub struct TelegramChatNotifier {
    config: ChatConfig,
    client: reqwest::Client,
}

impl TelegramChatNotifier {
    /// Create a chat notifier from configuration.
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.bot_token,
            method
        )
    }

    /// A recipient is either a numeric chat id or a handle; handles are
    /// sent in `@name` form.
    fn chat_ref(recipient: &str) -> Value {
        match recipient.parse::<i64>() {
            Ok(id) => json!(id),
            Err(_) => json!(format!("@{}", recipient.trim_start_matches('@'))),
        }
    }

    async fn send_message(&self, recipient: &str, text: &str) -> AppResult<bool> {
        let body = json!({
            "chat_id": Self::chat_ref(recipient),
            "text": text,
            "parse_mode": "Markdown",
            "disable_web_page_preview": true,
        });

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("sendMessage failed: {e}")))?;

        let result: ApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::delivery(format!("Invalid send response: {e}")))?;

        if !result.ok {
            return Err(AppError::delivery(format!(
                "Chat send rejected: {}",
                result.description.unwrap_or_default()
            )));
        }

        debug!(recipient, "Chat message sent");
        Ok(true)
    }
}

#[async_trait]
impl ChatNotifier for TelegramChatNotifier {
    async fn send_notification(
        &self,
        recipient: &str,
        title: &str,
        body: &str,
        action_url: Option<&str>,
        action_text: Option<&str>,
    ) -> AppResult<bool> {
        let mut text = format!("*{title}*\n\n{body}");
        if let Some(url) = action_url.filter(|u| !u.is_empty()) {
            let label = action_text.filter(|t| !t.is_empty()).unwrap_or("Open");
            text.push_str(&format!("\n\n[{label}]({url})"));
        }
        self.send_message(recipient, &text).await
    }

    async fn send_transaction_notification(
        &self,
        recipient: &str,
        title: &str,
        body: &str,
        summary: &TransactionSummary,
        detail_url: &str,
    ) -> AppResult<bool> {
        let text = format!(
            "*{title}*\n\n{body}\n\n\
             *Type:* {}\n\
             *Amount:* {} Pts\n\
             *Balance:* {} Pts\n\
             *Status:* {}\n\n\
             [View Transaction]({detail_url})",
            summary.kind, summary.amount, summary.balance, summary.status
        );
        self.send_message(recipient, &text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_ref_forms() {
        assert_eq!(TelegramChatNotifier::chat_ref("12345"), json!(12345));
        assert_eq!(TelegramChatNotifier::chat_ref("alice"), json!("@alice"));
        assert_eq!(TelegramChatNotifier::chat_ref("@alice"), json!("@alice"));
    }

    #[test]
    fn test_api_url() {
        let notifier = TelegramChatNotifier::new(ChatConfig {
            bot_token: "token123".into(),
            api_base: "https://api.telegram.org/".into(),
        });
        assert_eq!(
            notifier.api_url("sendMessage"),
            "https://api.telegram.org/bottoken123/sendMessage"
        );
    }
}
