//! In-memory secret resolver

use crate::{SecretError, SecretResolver, SecretVersionName};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolves secrets from an in-memory map keyed by `(project, secret)`.
///
/// Every call is recorded, so callers can assert how many fetches were
/// issued and for which resource names.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    entries: HashMap<(String, String), Result<String, String>>,
    fetches: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl MemoryResolver {
    /// Create an empty resolver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret value
    #[must_use]
    pub fn with_secret(
        mut self,
        project: impl Into<String>,
        secret: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.entries
            .insert((project.into(), secret.into()), Ok(value.into()));
        self
    }

    /// Make a secret fail with the given message
    #[must_use]
    pub fn with_failure(
        mut self,
        project: impl Into<String>,
        secret: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.entries
            .insert((project.into(), secret.into()), Err(message.into()));
        self
    }

    /// Number of `resolve` calls so far
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Resource names requested so far, in call order
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SecretResolver for MemoryResolver {
    fn provider_name(&self) -> &'static str {
        "memory"
    }

    async fn resolve(&self, version: &SecretVersionName) -> Result<String, SecretError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut names) = self.requested.lock() {
            names.push(version.resource_name());
        }

        let key = (version.project.clone(), version.secret.clone());
        match self.entries.get(&key) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(SecretError::fetch(&version.secret, message.clone())),
            None => Err(SecretError::fetch(
                &version.secret,
                format!("Secret [{}] not found", version.resource_name()),
            )),
        }
    }
}
