//! Creation-event queue between the service layer and the dispatcher.
//!
//! The creation path publishes persisted notifications here; the
//! dispatcher consumes them. The receiver half is moved into exactly one
//! consumer task, so "at most one listener" is enforced by ownership
//! rather than a process-wide registration flag.

use tokio::sync::mpsc;
use tracing::warn;

use peerhub_entity::notification::Notification;

/// Receiving half of the creation-event queue. There is exactly one; the
/// dispatcher's run loop consumes it.
pub type NotificationReceiver = mpsc::Receiver<Notification>;

/// Publishing half of the creation-event queue. Cheap to clone; one per
/// service instance.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    tx: mpsc::Sender<Notification>,
}

impl NotificationQueue {
    /// Create the queue, returning the publisher and the single receiver.
    pub fn channel(buffer: usize) -> (Self, NotificationReceiver) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }

    /// Publish a created notification for dispatch.
    ///
    /// Best-effort: delivery is fire-and-forget, so a full or closed
    /// queue drops the event with a warning instead of failing creation.
    /// The record itself is already persisted.
    pub fn publish(&self, notification: Notification) {
        if let Err(e) = self.tx.try_send(notification) {
            match &e {
                mpsc::error::TrySendError::Full(n) => {
                    warn!(
                        notification_id = %n.id,
                        recipient = %n.recipient,
                        "Creation queue full, dropping dispatch event"
                    );
                }
                mpsc::error::TrySendError::Closed(n) => {
                    warn!(
                        notification_id = %n.id,
                        recipient = %n.recipient,
                        "Creation queue closed, dropping dispatch event"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peerhub_entity::notification::{NewNotification, NotificationType};

    fn notification() -> Notification {
        let new = NewNotification::new(uuid::Uuid::new_v4(), NotificationType::ProfileView);
        Notification {
            id: uuid::Uuid::new_v4(),
            recipient: new.recipient,
            sender: None,
            kind: new.kind,
            title: new.title,
            message: new.message,
            related_to: None,
            action: None,
            priority: new.priority,
            is_read: false,
            is_archived: false,
            metadata: new.metadata,
            expires_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_publish_and_receive() {
        let (queue, mut rx) = NotificationQueue::channel(4);
        let n = notification();
        queue.publish(n.clone());
        let received = rx.recv().await.expect("queue should deliver");
        assert_eq!(received.id, n.id);
    }

    #[tokio::test]
    async fn test_publish_to_full_queue_drops_silently() {
        let (queue, _rx) = NotificationQueue::channel(1);
        queue.publish(notification());
        // Second publish hits a full buffer; must not panic or block.
        queue.publish(notification());
    }
}
