//! Secret resolution for keyslot
//!
//! Provides the pieces behind the `/secrets` endpoint:
//! - [`DeploymentConfig`]: the deploy-environment tag and project id, checked lazily
//! - [`SecretVersionName`]: `projects/{project}/secrets/{name}/versions/latest`
//! - [`SecretResolver`]: the one call every secret backend implements
//! - [`fetch_slots`]: the four-way concurrent fetch with an explicit [`ErrorPolicy`]
//!
//! ```ignore
//! use keyslot_secrets::{DeploymentConfig, ErrorPolicy, fetch_slots};
//!
//! let config = DeploymentConfig::from_env();
//! let secrets = fetch_slots(&resolver, &config, ErrorPolicy::Strict).await?;
//! let body = serde_json::to_string(&secrets)?;
//! ```

mod aggregate;
mod config;
mod reference;
pub mod resolvers;
mod slots;
mod types;

pub use aggregate::{ErrorPolicy, fetch_secret, fetch_slots};
pub use config::{ConfigError, DeploymentConfig};
pub use reference::SecretVersionName;
pub use resolvers::{EnvSecretResolver, MemoryResolver};
pub use slots::Slot;
pub use types::{SecretValue, SlotOutcome, SlotSecrets};

// Provider implementations are in separate crates:
// - keyslot-gcp: GcpResolver

use async_trait::async_trait;
use thiserror::Error;

/// Error types for secret resolution
#[derive(Debug, Error)]
pub enum SecretError {
    /// Required configuration was absent when a secret was requested
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The secret store call failed (not found, no access, transport, decoding)
    ///
    /// Displays only the underlying message so it can stand in for the value.
    #[error("{message}")]
    Fetch {
        /// Secret name that was requested
        name: String,
        /// Error message from the backend
        message: String,
    },

    /// A secret backend could not be initialized
    #[error("Failed to initialize {provider} secret backend: {message}")]
    Backend {
        /// Provider name (e.g. `"gcp"`)
        provider: &'static str,
        /// Error message from the backend
        message: String,
    },
}

impl SecretError {
    /// Build a [`SecretError::Fetch`] for the given secret
    #[must_use]
    pub fn fetch(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Short machine-readable kind, used in HTTP error bodies
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration_error",
            Self::Fetch { .. } => "secret_fetch_error",
            Self::Backend { .. } => "backend_error",
        }
    }
}

/// Trait for fetching secret payloads from a backend.
///
/// Implementors hold only an immutable handle to their backend, so a single
/// resolver is shared across concurrent requests without locking.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Fetch the payload of one secret version as UTF-8 text.
    ///
    /// Issues exactly one call to the backend. No retries.
    async fn resolve(&self, version: &SecretVersionName) -> Result<String, SecretError>;

    /// Get the provider name for this resolver.
    ///
    /// Examples: `"gcp"`, `"env"`, `"memory"`
    fn provider_name(&self) -> &'static str;
}
