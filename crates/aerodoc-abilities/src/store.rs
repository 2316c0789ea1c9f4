//! Reactive ability store
//!
//! Holds the current compiled rule set and republishes it whenever the raw
//! permission payload changes. Queries never fail and never block on a
//! recompilation in progress.

use aerodoc_permissions::{compile, Action, RolePermissions, RuleSet, Subject};
use std::sync::Arc;
use tokio::sync::watch;

/// Process-visible holder of the currently compiled rule set.
///
/// Cheap to clone; clones share the same published state. Construct one per
/// session and drop it on logout - the watch channel closes with the last
/// clone.
#[derive(Debug, Clone)]
pub struct AbilityStore {
    current: Arc<watch::Sender<Arc<RuleSet>>>,
}

impl AbilityStore {
    /// Create a store with no resolvable permission data: all queries deny.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(RuleSet::deny_all()));
        Self {
            current: Arc::new(tx),
        }
    }

    /// Parse, compile, and publish the initial raw permission payload.
    pub fn initialize(&self, raw: Option<&str>) {
        self.publish(raw);
    }

    /// Parse, compile, and publish a changed raw permission payload.
    ///
    /// `None` means the payload was cleared; the actor keeps zero
    /// capabilities until new data arrives.
    pub fn update(&self, raw: Option<&str>) {
        self.publish(raw);
    }

    /// Whether the current rule set grants `action` on `subject`.
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.current.borrow().can(action, subject)
    }

    /// Logical negation of [`AbilityStore::can`].
    pub fn cannot(&self, action: Action, subject: Subject) -> bool {
        !self.can(action, subject)
    }

    /// Field-qualified query, accepted for call-site compatibility.
    ///
    /// No field-level distinctions exist in the compiled rules, so the field
    /// argument does not affect the answer.
    pub fn can_field(&self, action: Action, subject: Subject, _field: Option<&str>) -> bool {
        self.can(action, subject)
    }

    /// The current rule set as an immutable snapshot.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.current.borrow().clone()
    }

    /// Subscribe to rule-set publications.
    ///
    /// Every call to [`AbilityStore::initialize`] or [`AbilityStore::update`]
    /// notifies the receiver, including republications of an equal set.
    pub fn subscribe(&self) -> watch::Receiver<Arc<RuleSet>> {
        self.current.subscribe()
    }

    fn publish(&self, raw: Option<&str>) {
        let tree = raw.filter(|raw| !raw.trim().is_empty()).and_then(|raw| {
            match RolePermissions::from_json(raw) {
                Ok(tree) => Some(tree),
                Err(err) => {
                    // Fail closed: a payload we cannot read grants nothing.
                    tracing::warn!(%err, "discarding malformed permission payload");
                    None
                }
            }
        });

        let rules = Arc::new(compile(tree.as_ref()));
        tracing::debug!(granted = rules.granted_count(), "published rule set");
        self.current.send_replace(rules);
    }
}

impl Default for AbilityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_PAYLOAD: &str = r#"{
        "reviewAdministration": {
            "adminDocumentRepositoryView": {
                "pending": "view",
                "approved": { "permission": "no_access" },
                "deactivated": "view",
                "referenceDocuments": "no_access"
            }
        }
    }"#;

    const LEGACY_PAYLOAD: &str = r#"{
        "documentRepoAccess": {
            "inReview": { "permission": "view" },
            "referenceDocument": "view",
            "approved": "no_access",
            "deactivated": "view"
        }
    }"#;

    #[test]
    fn fresh_store_denies_everything() {
        let store = AbilityStore::new();
        for subject in Subject::ALL {
            assert!(store.cannot(Action::View, subject));
        }
    }

    #[test]
    fn initialize_publishes_compiled_rules() {
        let store = AbilityStore::new();
        store.initialize(Some(ADMIN_PAYLOAD));

        assert!(store.can(Action::View, Subject::PendingTab));
        assert!(store.cannot(Action::View, Subject::ApprovedTab));
        assert!(store.can(Action::View, Subject::DeactivatedTab));
        assert!(store.cannot(Action::View, Subject::ReferenceTab));
    }

    #[test]
    fn update_leaves_no_residue_from_previous_payload() {
        let store = AbilityStore::new();
        store.initialize(Some(ADMIN_PAYLOAD));
        store.update(Some(LEGACY_PAYLOAD));

        assert!(store.can(Action::View, Subject::PendingTab));
        assert!(store.can(Action::View, Subject::ReferenceTab));
        assert!(store.cannot(Action::View, Subject::ApprovedTab));
        assert!(store.can(Action::View, Subject::DeactivatedTab));
    }

    #[test]
    fn malformed_payload_degrades_to_all_denied() {
        let store = AbilityStore::new();
        store.initialize(Some(ADMIN_PAYLOAD));
        store.update(Some("{not json"));

        for subject in Subject::ALL {
            assert!(store.cannot(Action::View, subject));
        }
    }

    #[test]
    fn cleared_payload_revokes_all_capabilities() {
        let store = AbilityStore::new();
        store.initialize(Some(LEGACY_PAYLOAD));
        assert!(store.can(Action::View, Subject::PendingTab));

        store.update(None);
        for subject in Subject::ALL {
            assert!(store.cannot(Action::View, subject));
        }
    }

    #[test]
    fn empty_payload_is_treated_as_absent() {
        let store = AbilityStore::new();
        store.initialize(Some("   "));
        for subject in Subject::ALL {
            assert!(store.cannot(Action::View, subject));
        }
    }

    #[test]
    fn field_argument_does_not_affect_the_answer() {
        let store = AbilityStore::new();
        store.initialize(Some(ADMIN_PAYLOAD));

        assert!(store.can_field(Action::View, Subject::PendingTab, None));
        assert!(store.can_field(Action::View, Subject::PendingTab, Some("title")));
        assert!(!store.can_field(Action::View, Subject::ApprovedTab, Some("title")));
    }

    #[test]
    fn clones_share_published_state() {
        let store = AbilityStore::new();
        let view = store.clone();

        store.initialize(Some(ADMIN_PAYLOAD));
        assert!(view.can(Action::View, Subject::PendingTab));
    }

    #[test]
    fn snapshot_is_stable_across_later_updates() {
        let store = AbilityStore::new();
        store.initialize(Some(ADMIN_PAYLOAD));
        let before = store.snapshot();

        store.update(None);
        assert!(before.can(Action::View, Subject::PendingTab));
        assert!(store.cannot(Action::View, Subject::PendingTab));
    }

    #[tokio::test]
    async fn subscribers_observe_each_publication() {
        let store = AbilityStore::new();
        let mut rx = store.subscribe();

        store.initialize(Some(ADMIN_PAYLOAD));
        rx.changed().await.unwrap();
        assert!(rx.borrow().can(Action::View, Subject::PendingTab));

        store.update(None);
        rx.changed().await.unwrap();
        assert!(!rx.borrow().can(Action::View, Subject::PendingTab));
    }
}
