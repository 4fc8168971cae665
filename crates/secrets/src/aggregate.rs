//! Concurrent fetch of the four slot secrets
//!
//! All four fetches are started before any is awaited. How a failed fetch
//! affects the result is decided by an explicit [`ErrorPolicy`]:
//! - [`ErrorPolicy::Strict`]: the first failure fails the whole aggregation
//! - [`ErrorPolicy::Permissive`]: each failure is replaced by its message

use std::fmt;
use std::str::FromStr;

use crate::{
    DeploymentConfig, SecretError, SecretResolver, SecretValue, SecretVersionName, Slot,
    SlotOutcome, SlotSecrets,
};

/// How a failed slot fetch affects the aggregated result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Any failure fails the request; no partial result is returned
    #[default]
    Strict,
    /// Failures are degraded to their error message; the result is always complete
    Permissive,
}

impl ErrorPolicy {
    /// Name used on the command line and in the environment
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(format!(
                "Unknown error policy: {s} (expected 'strict' or 'permissive')"
            )),
        }
    }
}

/// Fetch the latest version of `secret_name` in the configured project.
///
/// # Errors
///
/// Returns [`SecretError::Config`] when the project id is missing, otherwise
/// whatever the resolver returns.
pub async fn fetch_secret(
    resolver: &dyn SecretResolver,
    config: &DeploymentConfig,
    secret_name: &str,
) -> Result<SecretValue, SecretError> {
    let version = SecretVersionName::latest(config.project_id()?, secret_name);
    tracing::debug!(
        secret = %secret_name,
        provider = resolver.provider_name(),
        "Fetching secret"
    );
    match resolver.resolve(&version).await {
        Ok(payload) => Ok(SecretValue::new(payload)),
        Err(e) => {
            tracing::warn!(
                secret = %secret_name,
                provider = resolver.provider_name(),
                error = %e,
                "Secret fetch failed"
            );
            Err(e)
        }
    }
}

/// Fetch all four slot secrets concurrently.
///
/// Both configuration values are resolved before any fetch is issued, so a
/// missing `DEPLOY_ENV` or `GOOGLE_CLOUD_PROJECT` never reaches the backend.
///
/// # Errors
///
/// Returns [`SecretError::Config`] for missing configuration under either
/// policy. Under [`ErrorPolicy::Strict`] also returns the first fetch failure.
pub async fn fetch_slots(
    resolver: &dyn SecretResolver,
    config: &DeploymentConfig,
    policy: ErrorPolicy,
) -> Result<SlotSecrets, SecretError> {
    let deploy_env = config.deploy_environment()?;
    config.project_id()?;

    let names = Slot::ALL.map(|slot| slot.secret_name(deploy_env));
    let [first, second, third, forth] = names
        .each_ref()
        .map(|name| fetch_secret(resolver, config, name));

    let secrets = match policy {
        ErrorPolicy::Strict => {
            let (first, second, third, forth) =
                futures::try_join!(first, second, third, forth)?;
            SlotSecrets {
                first: SlotOutcome::Value(first),
                second: SlotOutcome::Value(second),
                third: SlotOutcome::Value(third),
                forth: SlotOutcome::Value(forth),
            }
        }
        ErrorPolicy::Permissive => {
            let (first, second, third, forth) = futures::join!(first, second, third, forth);
            SlotSecrets {
                first: degrade(first),
                second: degrade(second),
                third: degrade(third),
                forth: degrade(forth),
            }
        }
    };

    tracing::debug!(
        deploy_env = %deploy_env,
        policy = %policy,
        failed = secrets.failed_count(),
        "Fetched slot secrets"
    );
    Ok(secrets)
}

fn degrade(result: Result<SecretValue, SecretError>) -> SlotOutcome {
    match result {
        Ok(value) => SlotOutcome::Value(value),
        Err(e) => SlotOutcome::Failed(e.to_string()),
    }
}
