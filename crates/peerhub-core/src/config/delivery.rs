//! Notification delivery configuration.

use serde::{Deserialize, Serialize};

/// Notification delivery settings: creation queue, dedup guard, and the
/// three outbound channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Base URL of the web client, used to build detail links when a
    /// notification carries no action URL of its own.
    #[serde(default = "default_client_base_url")]
    pub client_base_url: String,
    /// Display name of the product, used in email subjects and templates.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Buffer size of the creation-event queue.
    #[serde(default = "default_queue_buffer")]
    pub queue_buffer: usize,
    /// Dedup guard settings.
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Push provider settings.
    #[serde(default)]
    pub push: PushConfig,
    /// SMTP email settings.
    #[serde(default)]
    pub email: EmailConfig,
    /// Chat-bot settings.
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Dedup guard sizing. The guard is process-local; entries expire after
/// `ttl_seconds` and the key space is capped at `max_entries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Maximum number of keys retained per key space.
    #[serde(default = "default_dedup_max_entries")]
    pub max_entries: usize,
    /// Seconds after which a seen key is forgotten.
    #[serde(default = "default_dedup_ttl")]
    pub ttl_seconds: u64,
}

/// Push provider (HTTP multicast) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Multicast send endpoint.
    #[serde(default = "default_push_api_url")]
    pub api_url: String,
    /// Server API key sent as the Authorization header.
    #[serde(default)]
    pub server_key: String,
}

/// SMTP email settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub username: String,
    /// SMTP password.
    #[serde(default)]
    pub password: String,
    /// From address for outgoing notification emails.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Display name on the From header.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

/// Chat-bot (Telegram Bot API) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Bot token.
    #[serde(default)]
    pub bot_token: String,
    /// Bot API base URL.
    #[serde(default = "default_chat_api_base")]
    pub api_base: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            client_base_url: default_client_base_url(),
            app_name: default_app_name(),
            queue_buffer: default_queue_buffer(),
            dedup: DedupConfig::default(),
            push: PushConfig::default(),
            email: EmailConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            max_entries: default_dedup_max_entries(),
            ttl_seconds: default_dedup_ttl(),
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            api_url: default_push_api_url(),
            server_key: String::new(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: default_from_address(),
            from_name: default_from_name(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base: default_chat_api_base(),
        }
    }
}

fn default_client_base_url() -> String {
    "https://app.peerhub.io".to_string()
}

fn default_app_name() -> String {
    "PeerHub".to_string()
}

fn default_queue_buffer() -> usize {
    256
}

fn default_dedup_max_entries() -> usize {
    100_000
}

fn default_dedup_ttl() -> u64 {
    24 * 60 * 60
}

fn default_push_api_url() -> String {
    "https://fcm.googleapis.com/fcm/send".to_string()
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "no-reply@peerhub.io".to_string()
}

fn default_from_name() -> String {
    "PeerHub".to_string()
}

fn default_chat_api_base() -> String {
    "https://api.telegram.org".to_string()
}
