//! Environment variable secret resolver

use crate::{SecretError, SecretResolver, SecretVersionName};
use async_trait::async_trait;

/// Resolves secrets from environment variables
///
/// The secret name is mapped to a variable name by uppercasing it and
/// replacing `-` and `.` with `_`, so `staging-first-api-key` is read from
/// `STAGING_FIRST_API_KEY`. The project and version are ignored.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretResolver;

impl EnvSecretResolver {
    /// Create a new environment variable resolver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Environment variable name for a secret name
    #[must_use]
    pub fn var_name(secret: &str) -> String {
        secret
            .chars()
            .map(|c| match c {
                '-' | '.' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }
}

#[async_trait]
impl SecretResolver for EnvSecretResolver {
    fn provider_name(&self) -> &'static str {
        "env"
    }

    async fn resolve(&self, version: &SecretVersionName) -> Result<String, SecretError> {
        let var = Self::var_name(&version.secret);
        std::env::var(&var).map_err(|e| {
            SecretError::fetch(
                &version.secret,
                format!("Environment variable {var} is not usable: {e}"),
            )
        })
    }
}
