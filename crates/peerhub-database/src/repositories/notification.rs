//! Notification repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use peerhub_core::error::{AppError, ErrorKind};
use peerhub_core::result::AppResult;
use peerhub_core::types::pagination::{PageRequest, PageResponse};
use peerhub_entity::notification::{
    NewNotification, Notification, NotificationAction, NotificationMetadata, NotificationPriority,
    NotificationType, RelatedEntity, RelatedModel,
};

/// Filter for listing a user's notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationFilter {
    /// When set, only read (true) or unread (false) notifications.
    pub is_read: Option<bool>,
    /// Archived or live notifications; listing defaults to live.
    pub is_archived: bool,
}

/// Database row shape for a notification. Enum and structured fields are
/// stored as text/jsonb and converted to the rich entity on the way out.
#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    recipient: Uuid,
    sender: Option<Uuid>,
    kind: String,
    title: String,
    message: String,
    related_model: Option<String>,
    related_id: Option<Uuid>,
    action: Option<Json<NotificationAction>>,
    priority: String,
    is_read: bool,
    is_archived: bool,
    metadata: Json<NotificationMetadata>,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NotificationRow {
    fn into_notification(self) -> AppResult<Notification> {
        let kind = NotificationType::parse(&self.kind).ok_or_else(|| {
            AppError::new(
                ErrorKind::Serialization,
                format!("Unknown notification kind '{}'", self.kind),
            )
        })?;

        let related_to = match (self.related_model, self.related_id) {
            (Some(model), Some(id)) => {
                let model = RelatedModel::parse(&model).ok_or_else(|| {
                    AppError::new(
                        ErrorKind::Serialization,
                        format!("Unknown related model '{model}'"),
                    )
                })?;
                Some(RelatedEntity { model, id })
            }
            _ => None,
        };

        Ok(Notification {
            id: self.id,
            recipient: self.recipient,
            sender: self.sender,
            kind,
            title: self.title,
            message: self.message,
            related_to,
            action: self.action.map(|a| a.0),
            priority: NotificationPriority::from_str_value(&self.priority),
            is_read: self.is_read,
            is_archived: self.is_archived,
            metadata: self.metadata.0,
            expires_at: self.expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for notification CRUD operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new notification and return the stored record.
    pub async fn create(&self, new: &NewNotification) -> AppResult<Notification> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "INSERT INTO notifications \
             (recipient, sender, kind, title, message, related_model, related_id, action, priority, metadata, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(new.recipient)
        .bind(new.sender)
        .bind(new.kind.as_str())
        .bind(&new.title)
        .bind(&new.message)
        .bind(new.related_to.as_ref().map(|r| r.model.as_str()))
        .bind(new.related_to.as_ref().map(|r| r.id))
        .bind(new.action.as_ref().map(Json))
        .bind(new.priority.as_str())
        .bind(Json(&new.metadata))
        .bind(new.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })?;

        row.into_notification()
    }

    /// Find one notification by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })?;

        row.map(NotificationRow::into_notification).transpose()
    }

    /// List a user's notifications, newest first.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient = $1 AND is_archived = $2 \
               AND ($3::boolean IS NULL OR is_read = $3)",
        )
        .bind(user_id)
        .bind(filter.is_archived)
        .bind(filter.is_read)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
        })?;

        let rows = sqlx::query_as::<_, NotificationRow>(
            "SELECT * FROM notifications \
             WHERE recipient = $1 AND is_archived = $2 \
               AND ($3::boolean IS NULL OR is_read = $3) \
             ORDER BY created_at DESC LIMIT $4 OFFSET $5",
        )
        .bind(user_id)
        .bind(filter.is_archived)
        .bind(filter.is_read)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        let items = rows
            .into_iter()
            .map(NotificationRow::into_notification)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count unread, unarchived notifications for a user.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications \
             WHERE recipient = $1 AND is_read = FALSE AND is_archived = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark one of the user's notifications as read; returns the updated
    /// record, or `None` if it does not exist or belongs to someone else.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "UPDATE notifications SET is_read = TRUE, updated_at = NOW() \
             WHERE id = $1 AND recipient = $2 RETURNING *",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;

        row.map(NotificationRow::into_notification).transpose()
    }

    /// Mark all of the user's unread notifications as read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, updated_at = NOW() \
             WHERE recipient = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;

        Ok(result.rows_affected())
    }

    /// Archive one of the user's notifications.
    pub async fn archive(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        let row = sqlx::query_as::<_, NotificationRow>(
            "UPDATE notifications SET is_archived = TRUE, updated_at = NOW() \
             WHERE id = $1 AND recipient = $2 RETURNING *",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to archive notification", e)
        })?;

        row.map(NotificationRow::into_notification).transpose()
    }

    /// Delete one of the user's notifications. Returns `true` if deleted.
    pub async fn delete(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove notifications past their expiry deadline. The store, not the
    /// dispatcher, owns this guarantee; run it from a periodic sweep.
    pub async fn delete_expired(&self) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM notifications WHERE expires_at IS NOT NULL AND expires_at <= NOW()",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete expired notifications", e)
        })?;

        Ok(result.rows_affected())
    }
}
