//! Chat payload construction: transaction summaries and detail URLs.

use peerhub_core::types::delivery::TransactionSummary;
use peerhub_entity::notification::Notification;

/// Path under the client base URL where a transaction can be viewed.
const TRANSACTION_PATH: &str = "dashboard/transactions";

/// Build the structured transaction summary for a transaction-linked
/// system notification. Falls back to neutral values for missing fields.
pub fn transaction_summary(notification: &Notification) -> TransactionSummary {
    let meta = &notification.metadata;
    TransactionSummary {
        id: notification
            .transaction_ref()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        kind: meta.transaction_type().unwrap_or("Transaction").to_string(),
        amount: meta.amount(),
        balance: meta.balance(),
        status: meta.status().to_string(),
    }
}

/// Resolve the transaction detail URL: prefer the notification's own
/// action URL (normalized to carry an explicit scheme), else construct
/// one from the configured client base URL and the transaction id.
pub fn detail_url(notification: &Notification, client_base_url: &str) -> String {
    if let Some(action) = &notification.action {
        if !action.url.is_empty() {
            return ensure_scheme(&action.url);
        }
    }

    let base = ensure_scheme(client_base_url.trim_end_matches('/'));
    let tx = notification
        .transaction_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();
    format!("{base}/{TRANSACTION_PATH}/{tx}")
}

/// Prefix `https://` unless the value already carries an http scheme.
fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerhub_entity::notification::{
        NewNotification, NotificationMetadata, NotificationType, RelatedModel,
    };
    use serde_json::json;
    use uuid::Uuid;

    fn notification(new: NewNotification) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            recipient: new.recipient,
            sender: new.sender,
            kind: new.kind,
            title: new.title,
            message: new.message,
            related_to: new.related_to,
            action: new.action,
            priority: new.priority,
            is_read: false,
            is_archived: false,
            metadata: new.metadata,
            expires_at: new.expires_at,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn transaction_notification() -> (Notification, Uuid) {
        let tx = Uuid::new_v4();
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::SystemNotification)
                .related(RelatedModel::Transaction, tx)
                .metadata(NotificationMetadata::from_value(json!({
                    "transactionType": "BUY_PTS",
                    "amount": 50,
                    "balance": 150,
                    "status": "COMPLETED",
                }))),
        );
        (n, tx)
    }

    #[test]
    fn test_transaction_summary_fields() {
        let (n, tx) = transaction_notification();
        let summary = transaction_summary(&n);
        assert_eq!(summary.id, tx.to_string());
        assert_eq!(summary.kind, "BUY_PTS");
        assert_eq!(summary.amount, 50.0);
        assert_eq!(summary.balance, 150.0);
        assert_eq!(summary.status, "COMPLETED");
    }

    #[test]
    fn test_summary_defaults_when_metadata_sparse() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::SystemNotification)
                .related(RelatedModel::Transaction, Uuid::new_v4()),
        );
        let summary = transaction_summary(&n);
        assert_eq!(summary.kind, "Transaction");
        assert_eq!(summary.amount, 0.0);
        assert_eq!(summary.status, "Unknown");
    }

    #[test]
    fn test_detail_url_prefers_normalized_action_url() {
        let (mut n, _) = transaction_notification();
        n.action = Some(peerhub_entity::notification::NotificationAction {
            text: "View".into(),
            url: "app.peerhub.io/tx/9".into(),
        });
        assert_eq!(
            detail_url(&n, "https://app.peerhub.io"),
            "https://app.peerhub.io/tx/9"
        );

        n.action = Some(peerhub_entity::notification::NotificationAction {
            text: "View".into(),
            url: "http://app.peerhub.io/tx/9".into(),
        });
        assert_eq!(
            detail_url(&n, "https://app.peerhub.io"),
            "http://app.peerhub.io/tx/9"
        );
    }

    #[test]
    fn test_detail_url_constructed_from_base() {
        let (n, tx) = transaction_notification();
        assert_eq!(
            detail_url(&n, "app.peerhub.io/"),
            format!("https://app.peerhub.io/dashboard/transactions/{tx}")
        );
    }
}
