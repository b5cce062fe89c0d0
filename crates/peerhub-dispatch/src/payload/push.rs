//! Push data payload construction.
//!
//! Push data values are strings end to end (the provider contract), so
//! everything is stringified here.

use std::collections::HashMap;

use chrono::Utc;

use peerhub_entity::notification::Notification;

/// Click action hint: open the given URL.
const CLICK_OPEN_URL: &str = "OPEN_URL";
/// Click action hint: open the app at its default screen.
const CLICK_OPEN_APP: &str = "OPEN_APP";

/// Build the data map for a push send.
///
/// Transaction-linked system notifications carry the structured
/// transaction fields; everything else carries the click-action form.
pub fn data_payload(notification: &Notification) -> HashMap<String, String> {
    let mut data = HashMap::new();
    data.insert(
        "notificationType".to_string(),
        notification.kind.as_str().to_string(),
    );
    data.insert("notificationId".to_string(), notification.id.to_string());

    if let Some(rel) = &notification.related_to {
        data.insert("relatedModel".to_string(), rel.model.as_str().to_string());
        data.insert("relatedId".to_string(), rel.id.to_string());
    }

    if notification.transaction_ref().is_some() && !notification.metadata.is_empty() {
        let meta = &notification.metadata;
        data.insert(
            "transactionType".to_string(),
            meta.transaction_type().unwrap_or("Transaction").to_string(),
        );
        data.insert("amount".to_string(), meta.amount().to_string());
        data.insert("status".to_string(), meta.status().to_string());
        return data;
    }

    let url = notification
        .action
        .as_ref()
        .map(|a| a.url.clone())
        .unwrap_or_default();
    let click_action = if url.is_empty() {
        CLICK_OPEN_APP
    } else {
        CLICK_OPEN_URL
    };
    data.insert("clickAction".to_string(), click_action.to_string());
    data.insert("url".to_string(), url);
    data.insert(
        "timestamp".to_string(),
        Utc::now().timestamp_millis().to_string(),
    );

    data
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

    #[test]
    fn test_transaction_payload_carries_structured_fields() {
        let tx = Uuid::new_v4();
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::SystemNotification)
                .related(RelatedModel::Transaction, tx)
                .metadata(NotificationMetadata::from_value(json!({
                    "transactionType": "BUY_PTS",
                    "amount": 50,
                    "status": "COMPLETED",
                }))),
        );

        let data = data_payload(&n);
        assert_eq!(data["transactionType"], "BUY_PTS");
        assert_eq!(data["amount"], "50");
        assert_eq!(data["status"], "COMPLETED");
        assert_eq!(data["relatedModel"], "Transaction");
        assert_eq!(data["relatedId"], tx.to_string());
        assert!(!data.contains_key("clickAction"));
    }

    #[test]
    fn test_click_action_follows_action_url() {
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::ConnectionRequest)
                .action("View Request", "/connections/requests/123"),
        );
        let data = data_payload(&n);
        assert_eq!(data["clickAction"], "OPEN_URL");
        assert_eq!(data["url"], "/connections/requests/123");

        let n = notification(NewNotification::new(
            Uuid::new_v4(),
            NotificationType::ProfileView,
        ));
        let data = data_payload(&n);
        assert_eq!(data["clickAction"], "OPEN_APP");
        assert_eq!(data["url"], "");
    }
}
