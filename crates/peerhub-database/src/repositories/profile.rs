//! Profile repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use peerhub_core::error::{AppError, ErrorKind};
use peerhub_core::result::AppResult;
use peerhub_entity::profile::ProfileDisplay;

#[derive(Debug, sqlx::FromRow)]
struct ProfileDisplayRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    profile_image: Option<String>,
}

/// Repository for profile display lookups.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new profile repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up the display projection of a profile.
    pub async fn display(&self, profile_id: Uuid) -> AppResult<Option<ProfileDisplay>> {
        let row = sqlx::query_as::<_, ProfileDisplayRow>(
            "SELECT id, owner_id, name, profile_image FROM profiles WHERE id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find profile", e))?;

        Ok(row.map(|r| ProfileDisplay {
            id: r.id,
            owner: r.owner_id,
            name: r.name,
            image: r.profile_image,
        }))
    }
}
