//! Rule-set compilation
//!
//! Flattens one permission tree into a total `(action, subject)` grant
//! mapping. The set is seeded all-denied before any leaf is read, so every
//! failure mode (absent tree, unknown shape, missing leaves) degrades to
//! zero capabilities rather than an error.

use crate::access::is_granted;
use crate::schema::{AdminRepositoryView, DocumentRepoAccess, ResolvedSchema, RolePermissions};
use crate::subject::{Action, Subject};
use std::collections::BTreeMap;

/// The compiled, total mapping from `(action, subject)` to grant status.
///
/// Conceptually immutable once published: the resolution engine replaces the
/// whole set atomically rather than mutating it in place. Pairs not present
/// in the map evaluate to denied, and the map is ordered so identical inputs
/// compile to identical sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: BTreeMap<(Action, Subject), bool>,
}

impl RuleSet {
    /// A rule set with every declared subject explicitly denied.
    pub fn deny_all() -> Self {
        let mut rules = BTreeMap::new();
        for subject in Subject::ALL {
            rules.insert((Action::View, subject), false);
        }
        Self { rules }
    }

    /// Whether the rule set grants `action` on `subject`.
    ///
    /// Pairs outside the compiled set answer `false`, never an error.
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.rules.get(&(action, subject)).copied().unwrap_or(false)
    }

    /// Logical negation of [`RuleSet::can`].
    pub fn cannot(&self, action: Action, subject: Subject) -> bool {
        !self.can(action, subject)
    }

    /// Number of granted pairs, used for publish diagnostics.
    pub fn granted_count(&self) -> usize {
        self.rules.values().filter(|granted| **granted).count()
    }

    /// Iterate over all compiled rules in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, Subject, bool)> + '_ {
        self.rules
            .iter()
            .map(|(&(action, subject), &granted)| (action, subject, granted))
    }

    fn set(&mut self, action: Action, subject: Subject, granted: bool) {
        self.rules.insert((action, subject), granted);
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::deny_all()
    }
}

/// Compile a permission tree into a rule set.
///
/// Pure and infallible: an absent tree, a tree conforming to neither schema,
/// or a shape with missing leaves all compile to (partially) denied sets.
/// Compiling the same tree twice yields identical sets.
pub fn compile(tree: Option<&RolePermissions>) -> RuleSet {
    let mut rules = RuleSet::deny_all();

    let Some(tree) = tree else {
        return rules;
    };

    match tree.resolve_schema() {
        ResolvedSchema::Administrative(view) => compile_administrative(&mut rules, view),
        ResolvedSchema::Legacy(legacy) => compile_legacy(&mut rules, legacy),
        ResolvedSchema::Empty => {}
    }

    rules
}

fn compile_administrative(rules: &mut RuleSet, view: &AdminRepositoryView) {
    rules.set(
        Action::View,
        Subject::PendingTab,
        is_granted(view.pending.as_ref()),
    );
    rules.set(
        Action::View,
        Subject::ApprovedTab,
        is_granted(view.approved.as_ref().and_then(|a| a.permission.as_ref())),
    );
    rules.set(
        Action::View,
        Subject::DeactivatedTab,
        is_granted(view.deactivated.as_ref()),
    );
    rules.set(
        Action::View,
        Subject::ReferenceTab,
        is_granted(view.reference_documents.as_ref()),
    );
}

fn compile_legacy(rules: &mut RuleSet, legacy: &DocumentRepoAccess) {
    rules.set(
        Action::View,
        Subject::PendingTab,
        is_granted(legacy.in_review.as_ref().and_then(|r| r.permission.as_ref())),
    );
    rules.set(
        Action::View,
        Subject::ApprovedTab,
        is_granted(legacy.approved.as_ref()),
    );
    rules.set(
        Action::View,
        Subject::DeactivatedTab,
        is_granted(legacy.deactivated.as_ref()),
    );
    rules.set(
        Action::View,
        Subject::ReferenceTab,
        is_granted(legacy.reference_document.as_ref()),
    );
}
