//! GCP integration for keyslot
//!
//! This crate provides GCP service integrations for keyslot.
//! Currently supports:
//! - GCP Secret Manager via the [`secrets`] module

pub mod secrets;

// Re-export main types for convenience
pub use secrets::GcpResolver;
