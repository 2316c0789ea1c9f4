//! Permission error types

/// Errors produced while handling raw permission payloads.
///
/// Resolution itself never fails: a tree conforming to neither schema simply
/// compiles to all-denied. Only payload parsing can go wrong, and callers on
/// the query path are expected to recover by treating the payload as absent.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    /// The raw payload was not valid JSON for any known schema shape.
    #[error("malformed permission payload: {message}")]
    MalformedPayload {
        /// Parser diagnostic for logging
        message: String,
    },
}
