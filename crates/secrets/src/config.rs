//! Deployment configuration required by secret-dependent operations

use thiserror::Error;

/// Required configuration that was absent at the time it was needed
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `DEPLOY_ENV` was unset or empty
    #[error("Missing DEPLOY_ENV environment variable")]
    MissingDeployEnv,

    /// `GOOGLE_CLOUD_PROJECT` was unset or empty
    #[error("Missing GOOGLE_CLOUD_PROJECT environment variable")]
    MissingProjectId,
}

/// Deploy-environment tag and project id.
///
/// Both values are optional at construction. They are only checked when a
/// secret-dependent operation asks for them, so a process can start and serve
/// `/` without them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentConfig {
    deploy_env: Option<String>,
    project_id: Option<String>,
}

impl DeploymentConfig {
    /// Environment variable holding the deploy-environment tag
    pub const DEPLOY_ENV_VAR: &'static str = "DEPLOY_ENV";

    /// Environment variable holding the project id
    pub const PROJECT_ID_VAR: &'static str = "GOOGLE_CLOUD_PROJECT";

    /// Create a config from explicit values. Empty strings count as absent.
    #[must_use]
    pub fn new(deploy_env: Option<String>, project_id: Option<String>) -> Self {
        Self {
            deploy_env: deploy_env.filter(|v| !v.is_empty()),
            project_id: project_id.filter(|v| !v.is_empty()),
        }
    }

    /// Snapshot both values from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(Self::DEPLOY_ENV_VAR).ok(),
            std::env::var(Self::PROJECT_ID_VAR).ok(),
        )
    }

    /// The deploy-environment tag used as a secret name prefix
    pub fn deploy_environment(&self) -> Result<&str, ConfigError> {
        self.deploy_env
            .as_deref()
            .ok_or(ConfigError::MissingDeployEnv)
    }

    /// The project that owns the secrets
    pub fn project_id(&self) -> Result<&str, ConfigError> {
        self.project_id
            .as_deref()
            .ok_or(ConfigError::MissingProjectId)
    }
}
