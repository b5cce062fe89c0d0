//! Delivery channel traits.
//!
//! Each channel is an independent capability with a single send contract.
//! The dispatcher treats every implementation as best-effort: a failed
//! send is logged by the caller and never retried.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::delivery::{PushOutcome, TransactionSummary};

/// Push delivery provider (device multicast).
#[async_trait]
pub trait PushSender: Send + Sync + std::fmt::Debug + 'static {
    /// Send one message to all given device tokens at once.
    ///
    /// The outcome reports per-token failures; tokens listed in
    /// `invalid_tokens` are permanently dead and should be pruned from
    /// the recipient's device list by the caller.
    async fn send_multicast(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
        data: HashMap<String, String>,
    ) -> AppResult<PushOutcome>;
}

/// Email delivery provider: named template rendering plus SMTP send.
#[async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug + 'static {
    /// Render a named template against a JSON data object.
    ///
    /// Fails when the template is unknown or the data cannot be applied;
    /// the caller is expected to fall back to a minimal message.
    async fn render_template(&self, name: &str, data: &serde_json::Value) -> AppResult<String>;

    /// Send an HTML email.
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

/// Chat-bot delivery provider.
#[async_trait]
pub trait ChatNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// Send a generic title/body notification, optionally with a
    /// call-to-action link. Returns whether the provider accepted it.
    async fn send_notification(
        &self,
        recipient: &str,
        title: &str,
        body: &str,
        action_url: Option<&str>,
        action_text: Option<&str>,
    ) -> AppResult<bool>;

    /// Send a structured transaction notification with a detail link.
    async fn send_transaction_notification(
        &self,
        recipient: &str,
        title: &str,
        body: &str,
        summary: &TransactionSummary,
        detail_url: &str,
    ) -> AppResult<bool>;
}
