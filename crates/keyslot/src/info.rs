//! Payload for the `GET /` info endpoint

use serde_json::{Map, Value};

/// Welcome message returned by `/`
pub const WELCOME_MESSAGE: &str = "Welcome to my API";

/// Which ambient environment value `/` reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum InfoVariant {
    /// `GAE_MODULE_NAME`, falling back to the comma-joined names of all
    /// environment variables when it is unset
    #[default]
    ModuleName,
    /// `GAE_SERVICE`, reported as `null` when unset
    Service,
}

impl InfoVariant {
    /// Environment variable read, also used as the response field name
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::ModuleName => "GAE_MODULE_NAME",
            Self::Service => "GAE_SERVICE",
        }
    }

    /// Build the payload from an environment lookup.
    ///
    /// `var_names` is only called when the module-name fallback is needed.
    pub fn payload<L, N>(self, lookup: L, var_names: N) -> Value
    where
        L: Fn(&str) -> Option<String>,
        N: FnOnce() -> Vec<String>,
    {
        let value = match (self, lookup(self.field())) {
            (_, Some(value)) => Value::String(value),
            (Self::ModuleName, None) => Value::String(var_names().join(",")),
            (Self::Service, None) => Value::Null,
        };

        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(WELCOME_MESSAGE.to_string()));
        body.insert(self.field().to_string(), value);
        Value::Object(body)
    }

    /// Build the payload from the current process environment
    #[must_use]
    pub fn payload_from_env(self) -> Value {
        self.payload(
            |name| std::env::var_os(name).map(|v| v.to_string_lossy().into_owned()),
            || {
                std::env::vars_os()
                    .map(|(name, _)| name.to_string_lossy().into_owned())
                    .collect()
            },
        )
    }
}
