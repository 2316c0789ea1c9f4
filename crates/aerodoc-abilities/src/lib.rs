//! # Aerodoc Abilities - Reactive Layer
//!
//! **Purpose**: Hold the currently compiled rule set and keep it in step with
//! the session's raw permission payload.
//!
//! The store is an explicitly owned object constructed once per session and
//! passed to consumers, not a process-wide singleton. Publication is a single
//! atomic swap of an immutable rule set through a `tokio::sync::watch`
//! channel, so readers see either the prior complete set or the next one,
//! never an intermediate state.
//!
//! Control flow: [`SessionStorage`] emits change events → [`AbilityWatcher`]
//! filters them by storage key → [`AbilityStore::update`] parses, compiles,
//! and publishes → call sites query [`AbilityStore::can`].
//!
//! ## What's NOT in this crate
//!
//! - Permission schemas and compilation (that's `aerodoc-permissions`)
//! - Durable persistence, authentication, tenant CRUD (external collaborators)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Session-scoped key/value storage with change notification
pub mod session;

/// The reactive holder of the compiled rule set
pub mod store;

/// Background subscription that recompiles on storage changes
pub mod watcher;

pub use session::{SessionStorage, StorageEvent};
pub use store::AbilityStore;
pub use watcher::AbilityWatcher;

pub use aerodoc_permissions::{compile, Action, RuleSet, Subject};
