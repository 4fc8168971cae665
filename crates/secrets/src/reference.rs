//! Fully-qualified secret version references

use std::fmt;

/// Version marker used for every fetch
pub const LATEST_VERSION: &str = "latest";

/// A secret version in a secret store, addressed as
/// `projects/{project}/secrets/{secret}/versions/{version}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretVersionName {
    /// Project that owns the secret
    pub project: String,

    /// Secret name
    pub secret: String,

    /// Version marker
    pub version: String,
}

impl SecretVersionName {
    /// Reference the latest version of `secret` in `project`
    #[must_use]
    pub fn latest(project: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            secret: secret.into(),
            version: LATEST_VERSION.to_string(),
        }
    }

    /// Get the full resource name for the secret version
    #[must_use]
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/secrets/{}/versions/{}",
            self.project, self.secret, self.version
        )
    }
}

impl fmt::Display for SecretVersionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_resource_name() {
        let name = SecretVersionName::latest("my-project", "prod-first-api-key");
        assert_eq!(
            name.resource_name(),
            "projects/my-project/secrets/prod-first-api-key/versions/latest"
        );
        assert_eq!(name.to_string(), name.resource_name());
    }
}
