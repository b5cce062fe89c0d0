//! Notification dispatcher — consumes creation events and fans out to
//! the enabled delivery channels.
//!
//! Each persisted notification is processed at most once per process
//! lifetime. Channels are evaluated independently: a failing channel is
//! logged and never blocks its siblings, and no failure is retried.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use peerhub_core::config::delivery::DeliveryConfig;
use peerhub_core::result::AppResult;
use peerhub_core::traits::channel::{ChatNotifier, EmailSender, PushSender};
use peerhub_core::traits::directory::RecipientDirectory;
use peerhub_core::traits::realtime::RealtimeSink;
use peerhub_core::types::delivery::DeliveryProfile;
use peerhub_entity::notification::{Notification, RelatedModel};

use super::dedup::DedupGuard;
use super::payload;
use super::payload::email::EmailContext;
use super::preferences::category_allows;
use super::queue::NotificationReceiver;

/// Fans one notification out to the real-time sink and the push, email,
/// and chat channels, honoring the recipient's live preferences.
#[derive(Debug)]
pub struct NotificationDispatcher {
    /// Recipient projection loads and push-token pruning.
    directory: Arc<dyn RecipientDirectory>,
    /// Push provider.
    push: Arc<dyn PushSender>,
    /// Email provider.
    email: Arc<dyn EmailSender>,
    /// Chat-bot provider.
    chat: Arc<dyn ChatNotifier>,
    /// Optional live-connection transport.
    realtime: Option<Arc<dyn RealtimeSink>>,
    /// Process-local dispatch dedup.
    dedup: Arc<DedupGuard>,
    /// Delivery settings (base URL, product name).
    config: DeliveryConfig,
}

impl NotificationDispatcher {
    /// Create a new dispatcher.
    pub fn new(
        directory: Arc<dyn RecipientDirectory>,
        push: Arc<dyn PushSender>,
        email: Arc<dyn EmailSender>,
        chat: Arc<dyn ChatNotifier>,
        dedup: Arc<DedupGuard>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            directory,
            push,
            email,
            chat,
            realtime: None,
            dedup,
            config,
        }
    }

    /// Attach a live-connection transport.
    pub fn with_realtime(mut self, sink: Arc<dyn RealtimeSink>) -> Self {
        self.realtime = Some(sink);
        self
    }

    /// Consume the creation-event queue until it closes. The receiver is
    /// taken by value: only one consumer can ever exist.
    pub async fn run(self: Arc<Self>, mut rx: NotificationReceiver) {
        info!("Notification dispatcher started");
        while let Some(notification) = rx.recv().await {
            self.handle_created(&notification).await;
        }
        info!("Creation queue closed, dispatcher stopping");
    }

    /// Process one created notification.
    pub async fn handle_created(&self, notification: &Notification) {
        // Mark as seen before doing any work so re-entrant duplicates
        // cannot race past the guard.
        if !self.dedup.first_seen(notification.id) {
            info!(
                notification_id = %notification.id,
                "Skipping duplicate dispatch for notification"
            );
            return;
        }

        // Several records can describe the same transaction event; only
        // the first (transaction, kind) pair is delivered.
        if let Some(rel) = &notification.related_to {
            if rel.model == RelatedModel::Transaction
                && !self.dedup.first_seen_transaction(rel.id, notification.kind)
            {
                info!(
                    transaction_id = %rel.id,
                    kind = %notification.kind,
                    "Skipping duplicate transaction notification"
                );
                return;
            }
        }

        if notification.is_archived {
            debug!(
                notification_id = %notification.id,
                "Notification already archived, not dispatching"
            );
            return;
        }

        info!(
            notification_id = %notification.id,
            recipient = %notification.recipient,
            kind = %notification.kind,
            related_model = notification.related_to.as_ref().map(|r| r.model.as_str()),
            "Processing notification"
        );

        // In-app refresh hint; not preference-gated.
        if let Some(sink) = &self.realtime {
            match serde_json::to_value(notification) {
                Ok(payload) => sink.push_to_user(notification.recipient, payload).await,
                Err(e) => error!(error = %e, "Failed to serialize notification for realtime"),
            }
        }

        let profile = match self.directory.delivery_profile(notification.recipient).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(
                    recipient = %notification.recipient,
                    "Recipient not found for notification, skipping delivery"
                );
                return;
            }
            Err(e) => {
                error!(
                    error = %e,
                    recipient = %notification.recipient,
                    "Failed to load delivery profile"
                );
                return;
            }
        };

        if profile.channels.push {
            if let Err(e) = self.dispatch_push(notification, &profile).await {
                self.log_channel_failure("push", notification, &e);
            }
        }

        if profile.channels.email {
            if let Err(e) = self.dispatch_email(notification, &profile).await {
                self.log_channel_failure("email", notification, &e);
            }
        }

        if profile.chat.as_ref().is_some_and(|c| c.enabled) {
            if let Err(e) = self.dispatch_chat(notification, &profile).await {
                self.log_channel_failure("chat", notification, &e);
            }
        }
    }

    /// Push: multicast to every registered device token, then prune the
    /// tokens the provider reported dead.
    async fn dispatch_push(
        &self,
        notification: &Notification,
        profile: &DeliveryProfile,
    ) -> AppResult<()> {
        let tokens = profile.push_tokens();
        if tokens.is_empty() {
            debug!(recipient = %profile.id, "No push-enabled devices, skipping push");
            return Ok(());
        }

        if !category_allows(&profile.category_preferences(), notification) {
            debug!(
                recipient = %profile.id,
                kind = %notification.kind,
                "Push disabled by category preference"
            );
            return Ok(());
        }

        let data = payload::push::data_payload(notification);
        let outcome = self
            .push
            .send_multicast(&tokens, &notification.title, &notification.message, data)
            .await?;

        if !outcome.invalid_tokens.is_empty() {
            info!(
                recipient = %profile.id,
                invalid = outcome.invalid_tokens.len(),
                "Pruning invalid push tokens"
            );
            self.directory
                .remove_push_tokens(profile.id, &outcome.invalid_tokens)
                .await?;
        }

        debug!(
            recipient = %profile.id,
            delivered = outcome.success_count,
            failed = outcome.failure_count,
            "Push notification sent"
        );
        Ok(())
    }

    /// Email: select a template, render it, and send; a render failure
    /// falls back to a minimal message rather than failing the channel.
    async fn dispatch_email(
        &self,
        notification: &Notification,
        profile: &DeliveryProfile,
    ) -> AppResult<()> {
        let Some(to) = profile.email.as_deref() else {
            debug!(recipient = %profile.id, "No email address on file, skipping email");
            return Ok(());
        };

        if !category_allows(&profile.category_preferences(), notification) {
            debug!(
                recipient = %profile.id,
                kind = %notification.kind,
                "Email disabled by category preference"
            );
            return Ok(());
        }

        let ctx = EmailContext {
            app_name: &self.config.app_name,
            base_url: &self.config.client_base_url,
        };
        let recipient_name = profile.full_name.as_deref().unwrap_or("User");
        let template = payload::email::select(notification);
        let subject = template.subject(notification, ctx);
        let data = payload::email::template_data(template, notification, recipient_name, ctx);

        match self.email.render_template(template.name(), &data).await {
            Ok(html) => {
                self.email.send(to, &subject, &html).await?;
                debug!(
                    recipient = %profile.id,
                    template = template.name(),
                    "Email notification sent"
                );
            }
            Err(e) => {
                error!(
                    error = %e,
                    template = template.name(),
                    "Email template failed to render, sending fallback email"
                );
                let html = payload::email::fallback_html(notification);
                self.email.send(to, &subject, &html).await?;
            }
        }

        Ok(())
    }

    /// Chat: structured transaction form for transaction-linked system
    /// notifications, the generic form for everything else.
    async fn dispatch_chat(
        &self,
        notification: &Notification,
        profile: &DeliveryProfile,
    ) -> AppResult<()> {
        let Some(settings) = profile.chat.as_ref() else {
            return Ok(());
        };
        let Some(recipient) = settings.recipient() else {
            debug!(
                recipient = %profile.id,
                "Chat enabled but no chat recipient set, skipping chat"
            );
            return Ok(());
        };

        if !category_allows(&settings.preferences, notification) {
            debug!(
                recipient = %profile.id,
                kind = %notification.kind,
                "Chat disabled by category preference"
            );
            return Ok(());
        }

        let delivered = if notification.transaction_ref().is_some()
            && !notification.metadata.is_empty()
        {
            let summary = payload::chat::transaction_summary(notification);
            let url = payload::chat::detail_url(notification, &self.config.client_base_url);
            self.chat
                .send_transaction_notification(
                    recipient,
                    &notification.title,
                    &notification.message,
                    &summary,
                    &url,
                )
                .await?
        } else {
            let action_url = notification.action.as_ref().map(|a| a.url.as_str());
            let action_text = notification.action.as_ref().map(|a| a.text.as_str());
            self.chat
                .send_notification(
                    recipient,
                    &notification.title,
                    &notification.message,
                    action_url,
                    action_text,
                )
                .await?
        };

        debug!(
            recipient = %profile.id,
            delivered,
            "Chat notification processed"
        );
        Ok(())
    }

    fn log_channel_failure(
        &self,
        channel: &str,
        notification: &Notification,
        error: &peerhub_core::AppError,
    ) {
        error!(
            error = %error,
            channel,
            notification_id = %notification.id,
            recipient = %notification.recipient,
            kind = %notification.kind,
            related_model = notification.related_to.as_ref().map(|r| r.model.as_str()),
            "Channel delivery failed"
        );
    }
}
