//! Access-level leaf values and grant semantics
//!
//! The single point of truth for what counts as a grant. Higher-level logic
//! must route through [`is_granted`] rather than re-deriving equality checks,
//! so denial semantics stay consistent if the sentinel set ever grows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A permission leaf value.
///
/// Tenant role documents carry free-form strings on their permission leaves.
/// Exactly one value, [`AccessLevel::NO_ACCESS`], is an explicit denial;
/// every other value is interpreted as a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessLevel(String);

impl AccessLevel {
    /// The denial sentinel.
    pub const NO_ACCESS: &'static str = "no_access";

    /// Wrap a raw leaf value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Whether this value is a grant.
    pub fn is_granted(&self) -> bool {
        self.0 != Self::NO_ACCESS
    }

    /// The raw leaf value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccessLevel {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Evaluate an optional permission leaf.
///
/// An absent leaf is treated identically to the denial sentinel (fail-closed).
pub fn is_granted(level: Option<&AccessLevel>) -> bool {
    level.is_some_and(AccessLevel::is_granted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_denied() {
        assert!(!AccessLevel::new("no_access").is_granted());
    }

    #[test]
    fn any_other_value_is_granted() {
        for value in ["view", "edit", "full", "", "NO_ACCESS", "no access"] {
            assert!(AccessLevel::new(value).is_granted(), "{value:?}");
        }
    }

    #[test]
    fn absent_leaf_is_denied() {
        assert!(!is_granted(None));
        assert!(!is_granted(Some(&AccessLevel::new("no_access"))));
        assert!(is_granted(Some(&AccessLevel::new("view"))));
    }
}
