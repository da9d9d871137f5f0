//! Error types for the review core.

use crate::invoice::InvoiceStatus;
use std::fmt;

/// Result type for review operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the review core.
///
/// All operations return `Result<T>` where `Result` is defined as `std::result::Result<T, Error>`.
/// Different error variants represent different failure modes:
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Referenced record does not exist.
    ///
    /// Raised when an operation names an invoice id, user id, or username
    /// that is absent from the backing store.
    ///
    /// **Recovery:** Verify the id; the record may have been removed or
    /// never ingested.
    NotFound(String),

    /// Uniqueness violation on account creation.
    ///
    /// Raised when a reviewer account is created with a username or email
    /// that already exists. Comparison is case-insensitive.
    ///
    /// **Recovery:** Pick a different username/email.
    AlreadyExists(String),

    /// Operation not permitted for the target record.
    ///
    /// Raised when:
    /// - Deleting a user whose role is `admin`
    ///
    /// The store is left unchanged.
    Forbidden(String),

    /// Malformed argument.
    ///
    /// Raised when:
    /// - Pagination parameters are zero (`page` or `page_size`)
    /// - `recent(limit)` is called with `limit == 0`
    /// - Required fields are empty on account creation
    InvalidArgument(String),

    /// Status transition rejected by the guarded policy.
    ///
    /// Only raised under `TransitionPolicy::Guarded`; the default permissive
    /// policy allows any status to be set from any prior status.
    InvalidTransition {
        /// Status the invoice currently holds
        from: InvoiceStatus,
        /// Status the caller attempted to set
        to: InvoiceStatus,
    },

    /// Backing repository error (database, etc).
    ///
    /// The bundled in-memory stores never raise this; persistent
    /// repository implementations map their driver errors here.
    ///
    /// **Recovery:** Retry after connection recovery.
    RepositoryError(String),

    /// Generic error with custom message.
    ///
    /// Used for errors that don't fit into other variants.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            Error::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition: {} -> {}", from, to)
            }
            Error::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(e.to_string())
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Other(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Other(e.to_string())
    }
}
