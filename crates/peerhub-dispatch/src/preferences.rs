//! Unified per-category preference evaluation.
//!
//! One gate shared by push, email, and chat, so every channel agrees on
//! which fine-grained categories a recipient has opted out of. Only two
//! notification shapes are category-gated: transaction-linked system
//! notifications (split by transaction type) and security alerts.
//! Everything else passes; the channel's own on/off toggle has already
//! been checked by the dispatcher.

use peerhub_core::types::delivery::CategoryPreferences;
use peerhub_entity::notification::{Notification, NotificationType};

/// Transaction type written by the purchase flow.
const TX_PURCHASE: &str = "BUY_PTS";
/// Transaction type written by the sale flow.
const TX_SALE: &str = "SELL_PTS";

/// Decide whether the recipient's category preferences allow this
/// notification. Absent preferences default to allow; an explicitly
/// false flag blocks.
pub fn category_allows(prefs: &CategoryPreferences, notification: &Notification) -> bool {
    if notification.transaction_ref().is_some() {
        return match notification.metadata.transaction_type() {
            Some(TX_PURCHASE) => prefs.purchase_confirmations,
            Some(TX_SALE) => prefs.sale_confirmations,
            _ => prefs.transactions,
        };
    }

    if notification.kind == NotificationType::SecurityAlert {
        return prefs.security;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
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
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn transaction_notification(tx_type: &str) -> Notification {
        notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::SystemNotification)
                .related(RelatedModel::Transaction, Uuid::new_v4())
                .metadata(NotificationMetadata::from_value(
                    json!({"transactionType": tx_type}),
                )),
        )
    }

    #[test]
    fn test_defaults_allow_transactions_and_security() {
        let prefs = CategoryPreferences::default();
        assert!(category_allows(&prefs, &transaction_notification(TX_PURCHASE)));
        assert!(category_allows(&prefs, &transaction_notification(TX_SALE)));
        assert!(category_allows(&prefs, &transaction_notification("TRANSFER")));

        let alert = notification(NewNotification::new(
            Uuid::new_v4(),
            NotificationType::SecurityAlert,
        ));
        assert!(category_allows(&prefs, &alert));
    }

    #[test]
    fn test_explicit_false_blocks_matching_category() {
        let prefs = CategoryPreferences {
            purchase_confirmations: false,
            ..CategoryPreferences::default()
        };
        assert!(!category_allows(&prefs, &transaction_notification(TX_PURCHASE)));
        // Sales and generic transactions remain allowed.
        assert!(category_allows(&prefs, &transaction_notification(TX_SALE)));
        assert!(category_allows(&prefs, &transaction_notification("TRANSFER")));

        let prefs = CategoryPreferences {
            security: false,
            ..CategoryPreferences::default()
        };
        let alert = notification(NewNotification::new(
            Uuid::new_v4(),
            NotificationType::SecurityAlert,
        ));
        assert!(!category_allows(&prefs, &alert));
    }

    #[test]
    fn test_ungated_kinds_always_pass() {
        let prefs = CategoryPreferences {
            transactions: false,
            security: false,
            connection_requests: false,
            messages: false,
            ..CategoryPreferences::default()
        };
        let n = notification(NewNotification::new(
            Uuid::new_v4(),
            NotificationType::ConnectionRequest,
        ));
        assert!(category_allows(&prefs, &n));

        // A system notification not linked to a transaction is ungated.
        let n = notification(
            NewNotification::new(Uuid::new_v4(), NotificationType::SystemNotification)
                .related(RelatedModel::Task, Uuid::new_v4()),
        );
        assert!(category_allows(&prefs, &n));
    }
}
