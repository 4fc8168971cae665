//! keyslot: a small HTTP service that serves per-environment API keys
//!
//! Two endpoints:
//! - `GET /` returns a welcome message and one ambient environment value
//! - `GET /secrets` fetches `{DEPLOY_ENV}-{first,second,third,forth}-api-key`
//!   from the configured secret backend and returns them as one JSON object
//!
//! ```ignore
//! let cli = keyslot::cli::parse();
//! keyslot::telemetry::init_tracing(cli.tracing_config())?;
//! keyslot::run(cli).await?;
//! ```

pub mod cli;
pub mod error;
pub mod http;
pub mod info;
pub mod shutdown;
pub mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use keyslot_secrets::{EnvSecretResolver, SecretResolver};
use tokio::net::TcpListener;

use crate::cli::{Backend, Cli};
use crate::error::StartupError;
use crate::http::AppState;

/// Build the resolver for the selected backend
pub async fn build_resolver(backend: Backend) -> Result<Arc<dyn SecretResolver>, StartupError> {
    match backend {
        Backend::Env => Ok(Arc::new(EnvSecretResolver::new())),
        #[cfg(feature = "gcp")]
        Backend::Gcp => {
            let resolver = keyslot_gcp::GcpResolver::new()
                .await
                .map_err(StartupError::Backend)?;
            Ok(Arc::new(resolver))
        }
        #[cfg(not(feature = "gcp"))]
        Backend::Gcp => Err(StartupError::BackendUnavailable { backend: "gcp" }),
    }
}

/// Serve until a shutdown signal arrives
pub async fn run(cli: Cli) -> Result<(), StartupError> {
    let resolver = build_resolver(cli.backend).await?;
    let state = AppState::new(
        resolver,
        cli.deployment_config(),
        cli.error_policy,
        cli.info_variant,
    );
    tracing::debug!(?state, "Application state ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    announce_listening(addr, &cli);

    axum::serve(listener, http::router(state))
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}

fn announce_listening(addr: SocketAddr, cli: &Cli) {
    tracing::info!(
        %addr,
        backend = ?cli.backend,
        error_policy = %cli.error_policy,
        "App listening on port {}",
        cli.port
    );
    tracing::info!("Press Ctrl+C to quit.");
}
