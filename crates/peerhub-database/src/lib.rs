//! # peerhub-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for the PeerHub delivery pipeline.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
