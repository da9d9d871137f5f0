//! Record id generation.
//!
//! The original mock layer derived ids from wall-clock time
//! (`user-<millis>`), which collides under concurrent creation. Ids here keep
//! the familiar prefixes but are backed by UUID v4.

use uuid::Uuid;

/// Prefix for invoice ids assigned at ingestion.
pub const INVOICE_PREFIX: &str = "INV";
/// Prefix for user account ids.
pub const USER_PREFIX: &str = "user";
/// Prefix for audit log ids.
pub const LOG_PREFIX: &str = "LOG";

/// Build a prefixed unique id: `"{prefix}-{uuid}"`.
pub fn prefixed(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Fresh user account id.
pub fn user_id() -> String {
    prefixed(USER_PREFIX)
}

/// Fresh audit log id.
pub fn log_id() -> String {
    prefixed(LOG_PREFIX)
}

/// Fresh invoice id (for ingestion pipelines and test fixtures).
pub fn invoice_id() -> String {
    prefixed(INVOICE_PREFIX)
}
