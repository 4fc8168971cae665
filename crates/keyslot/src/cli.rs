//! Command line and environment configuration

use clap::{Parser, ValueEnum};
use keyslot_secrets::{DeploymentConfig, ErrorPolicy};

use crate::info::InfoVariant;
use crate::telemetry::{Level, LogLevel, TracingConfig, TracingFormat};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Secret backend to fetch from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Google Cloud Secret Manager
    Gcp,
    /// Environment variables named after the secrets (local development)
    Env,
}

/// keyslot HTTP service
#[derive(Debug, Clone, Parser)]
#[command(name = "keyslot", version, about = "Serve per-environment API keys from Secret Manager")]
pub struct Cli {
    /// HTTP listen port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Deploy-environment tag prefixed onto secret names
    #[arg(long = "deploy-env", env = "DEPLOY_ENV")]
    pub deploy_env: Option<String>,

    /// Project that owns the secrets
    #[arg(long = "project", env = "GOOGLE_CLOUD_PROJECT")]
    pub project_id: Option<String>,

    /// How `/secrets` handles a failed fetch (strict or permissive)
    #[arg(long, env = "KEYSLOT_ERROR_POLICY", default_value = "strict")]
    pub error_policy: ErrorPolicy,

    /// Which ambient value `/` reports
    #[arg(long, env = "KEYSLOT_INFO_VARIANT", value_enum, default_value_t = InfoVariant::ModuleName)]
    pub info_variant: InfoVariant,

    /// Secret backend
    #[arg(long, env = "KEYSLOT_BACKEND", value_enum, default_value_t = Backend::Gcp)]
    pub backend: Backend,

    /// Log output format
    #[arg(long, env = "KEYSLOT_LOG_FORMAT", value_enum, default_value_t = TracingFormat::Compact)]
    pub log_format: TracingFormat,

    /// Log level (overridden by `RUST_LOG`)
    #[arg(long, env = "KEYSLOT_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub level: LogLevel,
}

impl Cli {
    /// Deployment configuration captured at startup and checked per request
    #[must_use]
    pub fn deployment_config(&self) -> DeploymentConfig {
        DeploymentConfig::new(self.deploy_env.clone(), self.project_id.clone())
    }

    /// Tracing configuration derived from the logging flags
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            format: self.log_format.clone(),
            level: Level::from(self.level.clone()),
        }
    }
}

/// Parse command line arguments and environment
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
