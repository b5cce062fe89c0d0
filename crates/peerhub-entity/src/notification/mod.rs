//! Notification domain entities.

pub mod kind;
pub mod metadata;
pub mod model;
pub mod priority;

pub use kind::NotificationType;
pub use metadata::NotificationMetadata;
pub use model::{NewNotification, Notification, NotificationAction, RelatedEntity, RelatedModel};
pub use priority::NotificationPriority;
