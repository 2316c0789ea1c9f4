//! # Aerodoc Permissions - Domain Crate
//!
//! **Purpose**: Define role permission schemas and compile them into a flat,
//! queryable rule set.
//!
//! This crate holds the pure logic of the role-to-ability resolution engine:
//! the two role permission schemas a tenant document may use, the access-level
//! grant semantics, and the compiler that flattens a permission tree into a
//! total `(action, subject)` grant mapping.
//!
//! ## Core Concepts
//!
//! - **Access levels**: leaf values on the permission tree; one denial
//!   sentinel (`no_access`), everything else is a grant, and an absent leaf
//!   is a denial (fail-closed).
//! - **Schema precedence**: a role document may carry an administrative and a
//!   legacy permission shape at the same time; resolution picks exactly one
//!   through [`RolePermissions::resolve_schema`].
//! - **Rule sets**: the compiled output is total over all declared subjects,
//!   so every query has an answer and the default answer is deny.
//!
//! ## What's NOT in this crate
//!
//! - Rule-set publication and live recompilation (that's `aerodoc-abilities`)
//! - Session persistence (external collaborator)
//! - Async execution (pure synchronous domain logic)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Access-level grant semantics
pub mod access;

/// Rule-set compilation from a permission tree
pub mod compile;

/// Permission error types
pub mod errors;

/// Role permission schemas and precedence resolution
pub mod schema;

/// Subjects and actions the engine resolves
pub mod subject;

pub use access::{is_granted, AccessLevel};
pub use compile::{compile, RuleSet};
pub use errors::PermissionError;
pub use schema::{
    AdminRepositoryView, ApprovedAccess, DocumentRepoAccess, InReviewAccess, ResolvedSchema,
    ReviewAdministration, RolePermissions,
};
pub use subject::{Action, Subject};
