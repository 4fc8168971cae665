//! GCP Secret Manager secret resolver

use async_trait::async_trait;
use google_cloud_secretmanager_v1::client::SecretManagerService;
use keyslot_secrets::{SecretError, SecretResolver, SecretVersionName};

/// Resolves secrets from GCP Secret Manager
///
/// Holds one `SecretManagerService` client built from application default
/// credentials. The client is cheap to clone and safe for concurrent use, so
/// a single resolver serves every request.
#[derive(Clone)]
pub struct GcpResolver {
    client: SecretManagerService,
}

impl std::fmt::Debug for GcpResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcpResolver")
            .field("provider", &"gcp")
            .finish_non_exhaustive()
    }
}

impl GcpResolver {
    /// Create a new GCP resolver using application default credentials
    ///
    /// # Errors
    /// Returns [`SecretError::Backend`] if the client cannot be built.
    pub async fn new() -> Result<Self, SecretError> {
        let client = SecretManagerService::builder()
            .build()
            .await
            .map_err(|e| SecretError::Backend {
                provider: "gcp",
                message: e.to_string(),
            })?;
        tracing::debug!("GCP Secret Manager client initialized");
        Ok(Self { client })
    }

    /// Decode a secret payload as UTF-8 text
    fn decode_payload(name: &str, data: Option<&[u8]>) -> Result<String, SecretError> {
        let data = data.ok_or_else(|| {
            SecretError::fetch(name, format!("Secret '{name}' has an empty or missing payload"))
        })?;
        std::str::from_utf8(data)
            .map(str::to_owned)
            .map_err(|e| {
                SecretError::fetch(name, format!("Secret '{name}' is not valid UTF-8: {e}"))
            })
    }
}

#[async_trait]
impl SecretResolver for GcpResolver {
    fn provider_name(&self) -> &'static str {
        "gcp"
    }

    async fn resolve(&self, version: &SecretVersionName) -> Result<String, SecretError> {
        let response = self
            .client
            .access_secret_version()
            .set_name(version.resource_name())
            .send()
            .await
            .map_err(|e| SecretError::fetch(&version.secret, e.to_string()))?;

        Self::decode_payload(
            &version.secret,
            response.payload.as_ref().map(|payload| &payload.data[..]),
        )
    }
}
