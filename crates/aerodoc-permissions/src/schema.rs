//! Role permission schemas and precedence resolution
//!
//! A role document may carry two partially-overlapping permission shapes at
//! once: the administrative shape under
//! `reviewAdministration.adminDocumentRepositoryView` and the legacy shape
//! under `documentRepoAccess`. Exactly one shape is authoritative per
//! resolution, decided by [`RolePermissions::resolve_schema`] - the single
//! testable decision point for precedence.

use crate::access::AccessLevel;
use crate::errors::PermissionError;
use serde::{Deserialize, Serialize};

/// The raw permission tree for one role, as persisted by the tenant.
///
/// Every field is optional; unknown fields are ignored. The tree is an
/// immutable snapshot for the duration of one compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissions {
    /// Administrative permission shape, when the role uses it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_administration: Option<ReviewAdministration>,

    /// Legacy permission shape, consulted only when the administrative
    /// shape is entirely absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_repo_access: Option<DocumentRepoAccess>,
}

/// Container for the administrative shape's repository view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAdministration {
    /// The administrative document repository permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_document_repository_view: Option<AdminRepositoryView>,
}

/// Administrative shape: per-tab access levels for the repository view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRepositoryView {
    /// Documents awaiting review
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<AccessLevel>,

    /// Approved documents, with the grant on the nested `permission` leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<ApprovedAccess>,

    /// Deactivated documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<AccessLevel>,

    /// Reference documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_documents: Option<AccessLevel>,
}

/// Nested `approved` object on the administrative shape.
///
/// Carries auxiliary per-action leaves alongside the grant; only the
/// `permission` leaf feeds tab-visibility decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovedAccess {
    /// The grant leaf for the approved tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<AccessLevel>,

    /// Auxiliary sub-action leaves, tolerated but unused here
    #[serde(flatten)]
    pub sub_actions: serde_json::Map<String, serde_json::Value>,
}

/// Legacy shape: per-tab access levels under `documentRepoAccess`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRepoAccess {
    /// Documents awaiting review, with the grant on the nested
    /// `permission` leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_review: Option<InReviewAccess>,

    /// Approved documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<AccessLevel>,

    /// Deactivated documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<AccessLevel>,

    /// Reference documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_document: Option<AccessLevel>,
}

/// Nested `inReview` object on the legacy shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InReviewAccess {
    /// The grant leaf for the pending tab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<AccessLevel>,

    /// Auxiliary sub-action leaves, tolerated but unused here
    #[serde(flatten)]
    pub sub_actions: serde_json::Map<String, serde_json::Value>,
}

/// The schema a resolution pass decided to honor.
///
/// Precedence is all-or-nothing: once the administrative shape is selected,
/// its missing leaves resolve via default-deny rather than by falling through
/// to the legacy shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedSchema<'a> {
    /// The administrative shape is present and alone authoritative
    Administrative(&'a AdminRepositoryView),

    /// No administrative shape; the legacy shape is authoritative
    Legacy(&'a DocumentRepoAccess),

    /// Neither shape present; everything denies
    Empty,
}

impl RolePermissions {
    /// Parse a raw JSON payload into a permission tree.
    pub fn from_json(raw: &str) -> Result<Self, PermissionError> {
        serde_json::from_str(raw).map_err(|err| PermissionError::MalformedPayload {
            message: err.to_string(),
        })
    }

    /// Decide which schema is authoritative for this tree.
    ///
    /// The administrative shape wins whenever its repository view object is
    /// present, even with all of its leaves absent.
    pub fn resolve_schema(&self) -> ResolvedSchema<'_> {
        if let Some(view) = self
            .review_administration
            .as_ref()
            .and_then(|admin| admin.admin_document_repository_view.as_ref())
        {
            return ResolvedSchema::Administrative(view);
        }

        match self.document_repo_access.as_ref() {
            Some(legacy) => ResolvedSchema::Legacy(legacy),
            None => ResolvedSchema::Empty,
        }
    }
}
