//! # peerhub-service
//!
//! Business logic for notification records: the service persisting and
//! publishing them, and the factory building well-formed notifications
//! for common domain events.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod notification;

pub use notification::{NotificationFactory, NotificationService};
