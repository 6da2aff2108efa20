//! Domain-level error types.

use thiserror::Error;

/// Terminal outcomes of a failed post workflow request.
///
/// `Forbidden` and `Unauthorized` share their display text; the wire contract
/// does not let callers tell a rejected credential from a post they may not
/// touch.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The bearer credential is missing, invalid, or could not be verified.
    #[error("Unauthorized")]
    Unauthorized,

    /// The target post does not exist.
    #[error("Post not found")]
    NotFound,

    /// The caller is authenticated but may not perform this operation on the
    /// target post.
    #[error("Unauthorized")]
    Forbidden,

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Store failure; carries the underlying error text unchanged.
    #[error("{0}")]
    Repository(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
