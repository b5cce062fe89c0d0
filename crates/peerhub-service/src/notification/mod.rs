//! Notification service and factory.

pub mod factory;
pub mod service;

pub use factory::NotificationFactory;
pub use service::NotificationService;
