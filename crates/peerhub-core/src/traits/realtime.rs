//! Real-time sink trait.

use async_trait::async_trait;
use uuid::Uuid;

/// Optional live-connection transport (e.g. a WebSocket hub).
///
/// The dispatcher pushes the full notification payload here regardless of
/// channel preferences — it is an in-app refresh hint, not a notification
/// channel. Best-effort: implementations swallow their own errors.
#[async_trait]
pub trait RealtimeSink: Send + Sync + std::fmt::Debug + 'static {
    /// Push a payload to the user's live channel, if connected.
    async fn push_to_user(&self, user_id: Uuid, payload: serde_json::Value);
}
