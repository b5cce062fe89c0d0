//! # peerhub-core
//!
//! Core crate for the PeerHub delivery pipeline. Contains boundary traits
//! for delivery channels and recipient lookup, configuration schemas,
//! pagination types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other PeerHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
