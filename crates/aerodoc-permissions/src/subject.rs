//! Subjects and actions the resolution engine knows about

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named capability target gated by the compiled rule set.
///
/// Each subject corresponds to one surface of the document repository that a
/// role may or may not be allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// Documents awaiting review
    PendingTab,

    /// Approved documents
    ApprovedTab,

    /// Deactivated documents
    DeactivatedTab,

    /// Reference documents
    ReferenceTab,
}

impl Subject {
    /// All subjects the engine resolves, in rule-set order.
    pub const ALL: [Subject; 4] = [
        Subject::PendingTab,
        Subject::ApprovedTab,
        Subject::DeactivatedTab,
        Subject::ReferenceTab,
    ];

    /// Stable identifier used in logs and serialized rule sets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::PendingTab => "PendingTab",
            Subject::ApprovedTab => "ApprovedTab",
            Subject::DeactivatedTab => "DeactivatedTab",
            Subject::ReferenceTab => "ReferenceTab",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation a role may perform on a subject.
///
/// Only `View` exists in this core; the enum leaves room for the action set
/// to grow without changing the rule-set representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    /// See the subject's surface at all
    View,
}

impl Action {
    /// Stable identifier used in logs and serialized rule sets.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_subjects_are_distinct() {
        for (i, a) in Subject::ALL.iter().enumerate() {
            for b in Subject::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display_matches_identifier() {
        assert_eq!(Subject::PendingTab.to_string(), "PendingTab");
        assert_eq!(Action::View.to_string(), "view");
    }
}
