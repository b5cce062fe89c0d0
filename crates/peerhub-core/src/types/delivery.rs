//! Delivery-facing projections and channel outcome types.
//!
//! These are the shapes exchanged across the dispatcher's boundary traits:
//! the per-recipient preference projection loaded before fan-out, and the
//! structured results returned by channel providers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of a user record the dispatcher needs to deliver a
/// notification: contact points and channel preferences, nothing else.
///
/// Loaded with an explicit field selection rather than the full user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryProfile {
    /// The user this projection belongs to.
    pub id: Uuid,
    /// Email address, if the user has one on file.
    pub email: Option<String>,
    /// Display name used in greetings.
    pub full_name: Option<String>,
    /// Per-channel on/off toggles.
    pub channels: ChannelToggles,
    /// Registered devices (push targets).
    pub devices: Vec<Device>,
    /// Chat-bot delivery settings, when the user has linked an account.
    pub chat: Option<ChatDeliverySettings>,
}

impl DeliveryProfile {
    /// Collect the non-empty push tokens across all registered devices.
    pub fn push_tokens(&self) -> Vec<String> {
        self.devices
            .iter()
            .filter_map(|d| d.push_token.as_deref())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The per-category preferences to gate fine-grained notification
    /// types with. The chat settings carry the only per-category store in
    /// the data model; recipients without one get the defaults.
    pub fn category_preferences(&self) -> CategoryPreferences {
        self.chat
            .as_ref()
            .map(|c| c.preferences.clone())
            .unwrap_or_default()
    }
}

/// Whether push and email delivery are enabled for a user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChannelToggles {
    /// Push notifications enabled.
    pub push: bool,
    /// Email notifications enabled.
    pub email: bool,
}

/// A registered device, carrying at most one push target.
///
/// Serialized with the client's wire naming (`pushToken`) since device
/// lists are stored as JSON documents written by the mobile clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Client-assigned device identifier.
    pub id: Option<String>,
    /// Human-readable device name.
    #[serde(default)]
    pub name: Option<String>,
    /// Push registration token, absent until the client registers one.
    #[serde(default)]
    pub push_token: Option<String>,
}

/// Chat-bot delivery settings for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDeliverySettings {
    /// Whether chat delivery is enabled at all.
    #[serde(default)]
    pub enabled: bool,
    /// Chat handle (e.g. a bot-platform username), without the `@`.
    #[serde(default)]
    pub username: Option<String>,
    /// Stable chat identifier; preferred over the handle when present.
    #[serde(default)]
    pub chat_id: Option<String>,
    /// Per-category delivery preferences.
    #[serde(default)]
    pub preferences: CategoryPreferences,
}

impl ChatDeliverySettings {
    /// Resolve the recipient to address messages to: the stable chat id
    /// when present, else the handle. `None` means chat delivery is not
    /// addressable for this user.
    pub fn recipient(&self) -> Option<&str> {
        self.chat_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Per-category notification preferences.
///
/// Transaction and security categories default to allow; the chattier
/// social categories default to off. An explicitly false flag blocks the
/// matching notification types on every channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPreferences {
    /// Generic transaction events.
    #[serde(default = "default_true")]
    pub transactions: bool,
    /// Status updates on existing transactions.
    #[serde(default = "default_true")]
    pub transaction_updates: bool,
    /// Purchase confirmations.
    #[serde(default = "default_true")]
    pub purchase_confirmations: bool,
    /// Sale confirmations.
    #[serde(default = "default_true")]
    pub sale_confirmations: bool,
    /// Security alerts.
    #[serde(default = "default_true")]
    pub security: bool,
    /// Connection requests.
    #[serde(default)]
    pub connection_requests: bool,
    /// Direct messages.
    #[serde(default)]
    pub messages: bool,
}

impl Default for CategoryPreferences {
    fn default() -> Self {
        Self {
            transactions: true,
            transaction_updates: true,
            purchase_confirmations: true,
            sale_confirmations: true,
            security: true,
            connection_requests: false,
            messages: false,
        }
    }
}

/// Result of a multicast push send.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushOutcome {
    /// Number of targets that accepted the message.
    pub success_count: u32,
    /// Number of targets that rejected or failed.
    pub failure_count: u32,
    /// Tokens the provider reported as no longer registered. The caller
    /// is expected to prune these from the recipient's device list.
    pub invalid_tokens: Vec<String>,
}

/// Structured transaction fields sent to the chat channel for
/// transaction-linked system notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Transaction identifier.
    pub id: String,
    /// Transaction type (e.g. `BUY_PTS`, `SELL_PTS`).
    pub kind: String,
    /// Transaction amount.
    pub amount: f64,
    /// Resulting account balance.
    pub balance: f64,
    /// Transaction status.
    pub status: String,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_tokens_skips_empty() {
        let profile = DeliveryProfile {
            id: Uuid::nil(),
            email: None,
            full_name: None,
            channels: ChannelToggles::default(),
            devices: vec![
                Device {
                    id: Some("a".into()),
                    name: None,
                    push_token: Some("tok-1".into()),
                },
                Device {
                    id: Some("b".into()),
                    name: None,
                    push_token: None,
                },
                Device {
                    id: Some("c".into()),
                    name: None,
                    push_token: Some(String::new()),
                },
            ],
            chat: None,
        };
        assert_eq!(profile.push_tokens(), vec!["tok-1".to_string()]);
    }

    #[test]
    fn test_chat_recipient_prefers_chat_id() {
        let settings = ChatDeliverySettings {
            enabled: true,
            username: Some("alice".into()),
            chat_id: Some("12345".into()),
            preferences: CategoryPreferences::default(),
        };
        assert_eq!(settings.recipient(), Some("12345"));

        let settings = ChatDeliverySettings {
            enabled: true,
            username: Some("alice".into()),
            chat_id: None,
            preferences: CategoryPreferences::default(),
        };
        assert_eq!(settings.recipient(), Some("alice"));
    }

    #[test]
    fn test_category_preference_defaults() {
        let prefs: CategoryPreferences = serde_json::from_str("{}").unwrap();
        assert!(prefs.transactions);
        assert!(prefs.security);
        assert!(!prefs.connection_requests);
        assert!(!prefs.messages);
    }
}
