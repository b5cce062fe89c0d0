//! # peerhub-channels
//!
//! Concrete delivery channel providers implementing the boundary traits
//! from `peerhub-core`:
//!
//! - [`FcmPushSender`] — HTTP multicast push with invalid-token reporting
//! - [`SmtpEmailSender`] — named template rendering + SMTP delivery
//! - [`TelegramChatNotifier`] — Bot API generic and transaction messages

pub mod chat;
pub mod email;
pub mod push;
pub mod templates;

pub use chat::TelegramChatNotifier;
pub use email::SmtpEmailSender;
pub use push::FcmPushSender;
