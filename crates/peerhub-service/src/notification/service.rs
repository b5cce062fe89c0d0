//! Notification persistence and user-facing record operations.

use std::sync::Arc;

use uuid::Uuid;

use peerhub_core::result::AppResult;
use peerhub_core::types::pagination::{PageRequest, PageResponse};
use peerhub_database::repositories::notification::{NotificationFilter, NotificationRepository};
use peerhub_dispatch::queue::NotificationQueue;
use peerhub_entity::notification::{NewNotification, Notification};

/// Manages notification records: creation (which feeds the dispatch
/// queue) and the read/archive/delete operations the user-facing API
/// exposes.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification repository.
    repo: Arc<NotificationRepository>,
    /// Creation-event queue feeding the dispatcher.
    queue: NotificationQueue,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(repo: Arc<NotificationRepository>, queue: NotificationQueue) -> Self {
        Self { repo, queue }
    }

    /// Persist a notification and publish it for dispatch.
    ///
    /// Store failures propagate to the caller — the caller needs to know
    /// the record was not created. Once persisted, delivery is
    /// best-effort and never fails this method.
    pub async fn create_notification(&self, new: NewNotification) -> AppResult<Notification> {
        let notification = self.repo.create(&new).await?;
        self.queue.publish(notification.clone());
        Ok(notification)
    }

    /// List a user's notifications, newest first.
    pub async fn list_notifications(
        &self,
        user_id: Uuid,
        filter: NotificationFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.repo.find_by_user(user_id, filter, &page).await
    }

    /// Count unread, unarchived notifications for a user.
    pub async fn unread_count(&self, user_id: Uuid) -> AppResult<i64> {
        self.repo.count_unread(user_id).await
    }

    /// Mark one of the user's notifications as read.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        self.repo.mark_read(notification_id, user_id).await
    }

    /// Mark all of the user's notifications as read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        self.repo.mark_all_read(user_id).await
    }

    /// Archive one of the user's notifications. Archived notifications
    /// are excluded from the default listing and never re-dispatch.
    pub async fn archive(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<Notification>> {
        self.repo.archive(notification_id, user_id).await
    }

    /// Delete one of the user's notifications. Returns `true` if deleted.
    pub async fn delete(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        self.repo.delete(notification_id, user_id).await
    }
}
