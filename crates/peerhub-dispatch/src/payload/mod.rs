//! Channel-specific payload construction.
//!
//! Each channel owns its payload shape: push sends a flat string data
//! map, email selects a named template plus a data object, chat sends
//! either a generic or a structured transaction message.

pub mod chat;
pub mod email;
pub mod push;
