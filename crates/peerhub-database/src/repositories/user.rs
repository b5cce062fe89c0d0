//! User repository implementation.
//!
//! The delivery pipeline only ever reads a projection of the user row
//! (contact points + preference fields) and performs one write-back:
//! pruning push tokens the provider reported dead.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use peerhub_core::error::{AppError, ErrorKind};
use peerhub_core::result::AppResult;
use peerhub_core::traits::directory::RecipientDirectory;
use peerhub_core::types::delivery::{
    ChannelToggles, ChatDeliverySettings, DeliveryProfile, Device,
};

/// Minimal display fields for a user, used when composing notification
/// messages about them.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserDisplay {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
}

impl UserDisplay {
    /// Join the name parts for display.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DeliveryProfileRow {
    id: Uuid,
    email: Option<String>,
    full_name: Option<String>,
    push_enabled: bool,
    email_enabled: bool,
    devices: Json<Vec<Device>>,
    chat_delivery: Option<Json<ChatDeliverySettings>>,
}

/// Repository for user lookups and the push-token pruning write-back.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user's display name fields.
    pub async fn display_name(&self, user_id: Uuid) -> AppResult<Option<UserDisplay>> {
        sqlx::query_as::<_, UserDisplay>(
            "SELECT first_name, last_name FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }
}

#[async_trait]
impl RecipientDirectory for UserRepository {
    async fn delivery_profile(&self, user_id: Uuid) -> AppResult<Option<DeliveryProfile>> {
        let row = sqlx::query_as::<_, DeliveryProfileRow>(
            "SELECT id, email, full_name, push_enabled, email_enabled, devices, chat_delivery \
             FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load delivery profile", e)
        })?;

        Ok(row.map(|r| DeliveryProfile {
            id: r.id,
            email: r.email,
            full_name: r.full_name,
            channels: ChannelToggles {
                push: r.push_enabled,
                email: r.email_enabled,
            },
            devices: r.devices.0,
            chat: r.chat_delivery.map(|c| c.0),
        }))
    }

    async fn remove_push_tokens(&self, user_id: Uuid, tokens: &[String]) -> AppResult<u64> {
        if tokens.is_empty() {
            return Ok(0);
        }

        // Keep devices whose token is absent or not in the dead list.
        let result = sqlx::query(
            "UPDATE users SET devices = COALESCE( \
                (SELECT jsonb_agg(d) FROM jsonb_array_elements(devices) AS d \
                 WHERE d->>'pushToken' IS NULL OR NOT (d->>'pushToken' = ANY($2))), \
                '[]'::jsonb), \
             updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(tokens)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to prune push tokens", e)
        })?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_present_parts() {
        let user = UserDisplay {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
        };
        assert_eq!(user.full_name(), "Ada Lovelace");

        let user = UserDisplay {
            first_name: Some("Ada".into()),
            last_name: None,
        };
        assert_eq!(user.full_name(), "Ada");
    }
}
