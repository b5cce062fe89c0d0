//! Recipient lookup trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::delivery::DeliveryProfile;

/// Lookup of recipient delivery data, plus the single write-back the
/// dispatcher performs: pruning push tokens a provider reported dead.
#[async_trait]
pub trait RecipientDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Load the delivery projection for a user. `None` when the user no
    /// longer exists (a stale reference, not an error).
    async fn delivery_profile(&self, user_id: Uuid) -> AppResult<Option<DeliveryProfile>>;

    /// Remove exactly the given push tokens from the user's device list.
    /// Returns the number of records updated.
    async fn remove_push_tokens(&self, user_id: Uuid, tokens: &[String]) -> AppResult<u64>;
}
