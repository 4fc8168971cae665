//! Error types for the keyslot service
//!
//! [`AppError`] is what request handlers return; it renders as a JSON body
//! with a 500 status. [`StartupError`] covers everything that can stop the
//! process before or while serving, reported through miette.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use keyslot_secrets::SecretError;
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Error returned by request handlers
#[derive(Debug, Error)]
#[error(transparent)]
pub struct AppError(#[from] SecretError);

impl AppError {
    /// Every secret or configuration failure is a server-side error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(
            kind = self.0.kind(),
            status = status.as_u16(),
            error = %self.0,
            "Request failed"
        );
        let body = Json(ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

/// Errors that stop the service
#[derive(Error, Debug, Diagnostic)]
pub enum StartupError {
    /// The secret backend could not be initialized
    #[error("Secret backend initialization failed")]
    #[diagnostic(
        code(keyslot::startup::backend),
        help("Check application default credentials, or run with --backend env for local development")
    )]
    Backend(#[source] SecretError),

    /// The selected backend was not compiled in
    #[error("Secret backend '{backend}' is not available in this build")]
    #[diagnostic(
        code(keyslot::startup::backend_unavailable),
        help("Rebuild keyslot with the matching cargo feature enabled")
    )]
    BackendUnavailable {
        /// Backend name
        backend: &'static str,
    },

    /// The listen address could not be bound
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(keyslot::startup::bind),
        help("Check that the port is free, or set PORT to another value")
    )]
    Bind {
        /// Address that was requested
        addr: std::net::SocketAddr,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an error
    #[error("HTTP server failed")]
    #[diagnostic(code(keyslot::serve))]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyslot_secrets::ConfigError;

    #[tokio::test]
    async fn test_config_error_response() {
        let response = AppError::from(SecretError::from(ConfigError::MissingDeployEnv))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "configuration_error");
        assert_eq!(json["message"], "Missing DEPLOY_ENV environment variable");
    }

    #[tokio::test]
    async fn test_fetch_error_response() {
        let response = AppError::from(SecretError::fetch("prod-first-api-key", "denied"))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "secret_fetch_error");
        assert_eq!(json["message"], "denied");
    }

    #[test]
    fn test_bind_error_keeps_io_source() {
        let err = StartupError::Bind {
            addr: std::net::SocketAddr::from(([0, 0, 0, 0], 8080)),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert_eq!(err.to_string(), "Failed to bind 0.0.0.0:8080");

        let source = std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<std::io::Error>())
            .unwrap();
        assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
    }

    #[test]
    fn test_startup_error_display() {
        let err = StartupError::BackendUnavailable { backend: "gcp" };
        assert!(err.to_string().contains("gcp"));
    }
}
