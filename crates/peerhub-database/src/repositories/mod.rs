//! Concrete repository implementations.

pub mod notification;
pub mod profile;
pub mod user;

pub use notification::{NotificationFilter, NotificationRepository};
pub use profile::ProfileRepository;
pub use user::{UserDisplay, UserRepository};
