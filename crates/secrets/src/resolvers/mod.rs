//! Secret resolver implementations
//!
//! This module provides built-in resolvers that require no external dependencies:
//!
//! - [`EnvSecretResolver`] - Environment variables, for local development
//! - [`MemoryResolver`] - In-memory map, for tests and embedding
//!
//! Managed secret stores are available via separate crates:
//!
//! - `gcp` - Google Cloud Secret Manager (keyslot-gcp crate)

mod env;
mod memory;

pub use env::EnvSecretResolver;
pub use memory::MemoryResolver;
