//! Repository traits abstracting the backing stores.
//!
//! The services depend only on these traits, never on a concrete collection,
//! so the bundled in-memory stores can be swapped for a relational database
//! (the future `invoices`, `invoice_line_items`, `users` and `system_logs`
//! tables) without touching query or lifecycle logic.
//!
//! # Implementing a repository
//!
//! Implement these traits for any storage backend:
//! - SQL databases: SQLx, tokio-postgres, Diesel
//! - In-memory: provided in [`inmemory`], used in tests and demos
//! - Custom ORMs or proprietary systems
//!
//! **IMPORTANT:** All methods use `&self` instead of `&mut self` to allow
//! concurrent access. Implementations should use interior mutability (RwLock,
//! Mutex, or external storage). Each mutation must appear atomic to readers;
//! no reader may observe a partially-applied record.
//!
//! **ASYNC:** All methods are async and must be awaited.
//!
//! # Error Handling
//!
//! When implementing the traits for real databases, return
//! [`crate::Error::RepositoryError`] for:
//! - Database connectivity issues
//! - Query timeouts
//! - Serialization errors
//! - Any other storage operation failures

use crate::audit_log::SystemLog;
use crate::error::Result;
use crate::invoice::Invoice;
use crate::user::User;

pub mod inmemory;

pub use inmemory::{InMemoryInvoiceStore, InMemoryLogStore, InMemoryUserStore};

/// Canonical store of invoice records.
///
/// Invoices enter via `insert` (the ingestion pipeline) and are mutated via
/// `replace`; there is no delete. At most one record per `id`, and `id` is
/// never reassigned. `fetch_all` must preserve insertion order; the query
/// engine relies on it for stable tie-breaking and queue ordering.
#[allow(async_fn_in_trait)]
pub trait InvoiceRepository: Send + Sync + Clone {
    /// Fetch every invoice in insertion order.
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn fetch_all(&self) -> Result<Vec<Invoice>>;

    /// Point lookup by id.
    ///
    /// # Returns
    /// - `Ok(Some(invoice))` - Record found
    /// - `Ok(None)` - Record not found (not an error at this layer)
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn fetch_by_id(&self, id: &str) -> Result<Option<Invoice>>;

    /// Add a newly ingested invoice.
    ///
    /// # Errors
    /// Returns `Err(AlreadyExists)` if the id is taken
    async fn insert(&self, invoice: Invoice) -> Result<()>;

    /// Overwrite the record with the same id, atomically.
    ///
    /// # Errors
    /// Returns `Err(NotFound)` if no record carries the id
    async fn replace(&self, invoice: Invoice) -> Result<()>;

    /// Count all records (optional optimization).
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn count(&self) -> Result<usize> {
        Ok(self.fetch_all().await?.len())
    }
}

/// Store of dashboard accounts.
#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync + Clone {
    /// Fetch every account in insertion order.
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn fetch_all(&self) -> Result<Vec<User>>;

    /// Point lookup by id.
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn fetch_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Add an account.
    ///
    /// Uniqueness of username/email is enforced by the account directory,
    /// not here; id collisions still fail.
    ///
    /// # Errors
    /// Returns `Err(AlreadyExists)` if the id is taken
    async fn insert(&self, user: User) -> Result<()>;

    /// Remove an account by id.
    ///
    /// # Errors
    /// Returns `Err(NotFound)` if no record carries the id
    async fn remove(&self, id: &str) -> Result<()>;

    /// Count all records (optional optimization).
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn count(&self) -> Result<usize> {
        Ok(self.fetch_all().await?.len())
    }
}

/// Append-only store of audit records, newest first.
#[allow(async_fn_in_trait)]
pub trait LogRepository: Send + Sync + Clone {
    /// Fetch every record, head first (most recent at index 0).
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn fetch_all(&self) -> Result<Vec<SystemLog>>;

    /// Place a fresh record at the head.
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn prepend(&self, log: SystemLog) -> Result<()>;

    /// Count all records (optional optimization).
    ///
    /// # Errors
    /// Returns `Err` if the store is unavailable
    async fn count(&self) -> Result<usize> {
        Ok(self.fetch_all().await?.len())
    }
}
