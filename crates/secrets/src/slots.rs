//! The four fixed secret slots and their naming convention

use std::fmt;

/// One of the four fixed positions in the aggregated response.
///
/// The fourth slot is spelled `forth`. Secret names in existing deployments
/// use that spelling, so it must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// `first`
    First,
    /// `second`
    Second,
    /// `third`
    Third,
    /// `forth`
    Forth,
}

impl Slot {
    /// All slots in response order
    pub const ALL: [Self; 4] = [Self::First, Self::Second, Self::Third, Self::Forth];

    /// Field name in the response and segment in the secret name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Second => "second",
            Self::Third => "third",
            Self::Forth => "forth",
        }
    }

    /// Secret name for this slot: `{deploy_env}-{slot}-api-key`
    #[must_use]
    pub fn secret_name(self, deploy_env: &str) -> String {
        format!("{deploy_env}-{}-api-key", self.as_str())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
