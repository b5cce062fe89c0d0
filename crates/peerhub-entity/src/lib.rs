//! # peerhub-entity
//!
//! Domain entity models for the PeerHub delivery pipeline: the
//! notification record family and the profile display projection used by
//! the factory builders.

pub mod notification;
pub mod profile;

pub use notification::{
    NewNotification, Notification, NotificationAction, NotificationMetadata, NotificationPriority,
    NotificationType, RelatedEntity, RelatedModel,
};
pub use profile::ProfileDisplay;
