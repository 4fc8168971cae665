//! HTTP routes
//!
//! | Method | Path       | Success                                   |
//! |--------|------------|-------------------------------------------|
//! | GET    | `/`        | `{message, <ambient field>}`              |
//! | GET    | `/secrets` | `{first, second, third, forth}`           |

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::routing::get;
use axum::{Json, Router};
use keyslot_secrets::{DeploymentConfig, ErrorPolicy, SecretResolver, SlotSecrets, fetch_slots};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::info::InfoVariant;
use crate::telemetry::instance_id;

/// Shared, immutable state for all requests
#[derive(Clone)]
pub struct AppState {
    /// Secret backend handle
    pub resolver: Arc<dyn SecretResolver>,
    /// Deployment configuration, checked on every `/secrets` request
    pub config: Arc<DeploymentConfig>,
    /// How failed fetches affect `/secrets`
    pub error_policy: ErrorPolicy,
    /// Which ambient value `/` reports
    pub info_variant: InfoVariant,
}

impl AppState {
    /// Create the state for a router
    #[must_use]
    pub fn new(
        resolver: Arc<dyn SecretResolver>,
        config: DeploymentConfig,
        error_policy: ErrorPolicy,
        info_variant: InfoVariant,
    ) -> Self {
        Self {
            resolver,
            config: Arc::new(config),
            error_policy,
            info_variant,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("provider", &self.resolver.provider_name())
            .field("config", &self.config)
            .field("error_policy", &self.error_policy)
            .field("info_variant", &self.info_variant)
            .finish()
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/secrets", get(secrets))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    instance_id = %instance_id(),
                )
            }),
        )
}

async fn info(State(state): State<AppState>) -> Json<Value> {
    Json(state.info_variant.payload_from_env())
}

async fn secrets(State(state): State<AppState>) -> Result<Json<SlotSecrets>, AppError> {
    let secrets = fetch_slots(state.resolver.as_ref(), &state.config, state.error_policy).await?;
    if secrets.failed_count() > 0 {
        tracing::warn!(
            failed = secrets.failed_count(),
            "Returning secrets with failed slots replaced by error messages"
        );
    }
    Ok(Json(secrets))
}
