//! Boundary traits implemented by infrastructure crates.

pub mod channel;
pub mod directory;
pub mod realtime;

pub use channel::{ChatNotifier, EmailSender, PushSender};
pub use directory::RecipientDirectory;
pub use realtime::RealtimeSink;
