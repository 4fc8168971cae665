//! Secret value and aggregated result types
//!
//! - [`SecretValue`]: a `secrecy::SecretString` wrapper that redacts itself in logs
//! - [`SlotOutcome`]: a slot's value, or the message of the error that replaced it
//! - [`SlotSecrets`]: the four outcomes in response order

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

use crate::Slot;

/// A fetched secret value.
///
/// `Debug` and `Display` print `[REDACTED]`. Serialization writes the raw
/// value, since returning it is the point of the `/secrets` endpoint.
#[derive(Clone)]
pub struct SecretValue {
    inner: SecretString,
}

impl SecretValue {
    /// Wrap a decoded payload
    #[must_use]
    pub fn new(value: String) -> Self {
        Self {
            inner: SecretString::from(value),
        }
    }

    /// Expose the secret value for use.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.inner.expose_secret()
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Serialize for SecretValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

/// Result of one slot's fetch as it appears in the response
#[derive(Debug, Clone)]
pub enum SlotOutcome {
    /// The secret was fetched
    Value(SecretValue),
    /// The fetch failed and the error message took the value's place
    Failed(String),
}

impl SlotOutcome {
    /// Whether this slot holds a real secret value
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// The string written to the response for this slot
    #[must_use]
    pub fn as_response_str(&self) -> &str {
        match self {
            Self::Value(value) => value.expose(),
            Self::Failed(message) => message,
        }
    }
}

impl Serialize for SlotOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_response_str())
    }
}

/// The four slot outcomes, serialized as `{first, second, third, forth}` in that order
#[derive(Debug, Clone, Serialize)]
pub struct SlotSecrets {
    /// `first` slot
    pub first: SlotOutcome,
    /// `second` slot
    pub second: SlotOutcome,
    /// `third` slot
    pub third: SlotOutcome,
    /// `forth` slot
    pub forth: SlotOutcome,
}

impl SlotSecrets {
    /// Get the outcome for a slot
    #[must_use]
    pub const fn get(&self, slot: Slot) -> &SlotOutcome {
        match slot {
            Slot::First => &self.first,
            Slot::Second => &self.second,
            Slot::Third => &self.third,
            Slot::Forth => &self.forth,
        }
    }

    /// Number of slots whose fetch failed
    #[must_use]
    pub fn failed_count(&self) -> usize {
        Slot::ALL
            .iter()
            .filter(|slot| !self.get(**slot).is_value())
            .count()
    }
}
