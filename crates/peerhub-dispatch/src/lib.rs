//! # peerhub-dispatch
//!
//! Notification fan-out engine for PeerHub. Provides:
//!
//! - An explicit creation-event queue consumed by exactly one dispatcher
//! - Process-local deduplication (notification ids and transaction/type
//!   composite keys)
//! - Per-channel branching on live user preferences with isolated
//!   failure handling
//! - Channel payload construction (push data maps, email template
//!   selection, chat transaction summaries)
//! - Invalid push-token reconciliation back into the user store

pub mod dedup;
pub mod dispatcher;
pub mod payload;
pub mod preferences;
pub mod queue;

pub use dedup::DedupGuard;
pub use dispatcher::NotificationDispatcher;
pub use queue::{NotificationQueue, NotificationReceiver};
