use thiserror::Error;

/// Failures surfaced by the store gateway. Anything outside this taxonomy
/// (malformed bodies, builder errors) propagates through `lambda_http::Error`
/// as a generic fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A create arrived without an `x-user-id` header.
    #[error("User ID required")]
    MissingOwner,

    /// No record matches the {id, owner} pair. Carries the resource name for
    /// the error body ("Task" or "Agenda item").
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("store backend error: {0}")]
    Backend(String),
}
