//! In-memory stores (default, thread-safe, async).
//!
//! Each store is an insertion-ordered `Vec` behind one `RwLock`, a direct
//! stand-in for the relational table it will become. One lock per store is
//! enough here: every mutation is a short, synchronous, in-place update, and
//! no operation spans two stores atomically. Guards are never held across an
//! `.await`.

use super::{InvoiceRepository, LogRepository, UserRepository};
use crate::audit_log::SystemLog;
use crate::error::{Error, Result};
use crate::invoice::Invoice;
use crate::user::User;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read_guard<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| Error::RepositoryError("store lock poisoned".to_string()))
}

fn write_guard<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| Error::RepositoryError("store lock poisoned".to_string()))
}

/// Thread-safe in-memory invoice store.
///
/// Clones share the same underlying table, so a cloned store handed to
/// another task sees the same records.
///
/// # Example
///
/// ```no_run
/// use review_kit::store::{InMemoryInvoiceStore, InvoiceRepository};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = InMemoryInvoiceStore::new();
///     // invoices arrive from the ingestion pipeline via insert()
///     assert_eq!(store.count().await?, 0);
///     Ok(())
/// }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    records: Arc<RwLock<Vec<Invoice>>>,
}

impl InMemoryInvoiceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records, preserving their order.
    pub fn with_records(records: Vec<Invoice>) -> Self {
        InMemoryInvoiceStore {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl InvoiceRepository for InMemoryInvoiceStore {
    async fn fetch_all(&self) -> Result<Vec<Invoice>> {
        Ok(read_guard(&self.records)?.clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(read_guard(&self.records)?
            .iter()
            .find(|inv| inv.id == id)
            .cloned())
    }

    async fn insert(&self, invoice: Invoice) -> Result<()> {
        let mut records = write_guard(&self.records)?;
        if records.iter().any(|inv| inv.id == invoice.id) {
            return Err(Error::AlreadyExists(format!("invoice {}", invoice.id)));
        }
        debug!("✓ InvoiceStore INSERT {}", invoice.id);
        records.push(invoice);
        Ok(())
    }

    async fn replace(&self, invoice: Invoice) -> Result<()> {
        let mut records = write_guard(&self.records)?;
        match records.iter_mut().find(|inv| inv.id == invoice.id) {
            Some(slot) => {
                debug!("✓ InvoiceStore REPLACE {}", invoice.id);
                *slot = invoice;
                Ok(())
            }
            None => Err(Error::NotFound(format!("invoice {}", invoice.id))),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(read_guard(&self.records)?.len())
    }
}

/// Thread-safe in-memory user store.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    records: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with accounts (seed admins go here).
    pub fn with_records(records: Vec<User>) -> Self {
        InMemoryUserStore {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl UserRepository for InMemoryUserStore {
    async fn fetch_all(&self) -> Result<Vec<User>> {
        Ok(read_guard(&self.records)?.clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(read_guard(&self.records)?
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<()> {
        let mut records = write_guard(&self.records)?;
        if records.iter().any(|u| u.id == user.id) {
            return Err(Error::AlreadyExists(format!("user {}", user.id)));
        }
        debug!("✓ UserStore INSERT {}", user.id);
        records.push(user);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut records = write_guard(&self.records)?;
        match records.iter().position(|u| u.id == id) {
            Some(index) => {
                debug!("✓ UserStore REMOVE {}", id);
                records.remove(index);
                Ok(())
            }
            None => Err(Error::NotFound(format!("user {}", id))),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(read_guard(&self.records)?.len())
    }
}

/// Thread-safe in-memory audit log store, newest record first.
///
/// Unbounded: no retention or compaction policy is applied. A persistent
/// implementation should decide one.
#[derive(Clone, Default)]
pub struct InMemoryLogStore {
    records: Arc<RwLock<Vec<SystemLog>>>,
}

impl InMemoryLogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records (expected head-first).
    pub fn with_records(records: Vec<SystemLog>) -> Self {
        InMemoryLogStore {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl LogRepository for InMemoryLogStore {
    async fn fetch_all(&self) -> Result<Vec<SystemLog>> {
        Ok(read_guard(&self.records)?.clone())
    }

    async fn prepend(&self, log: SystemLog) -> Result<()> {
        let mut records = write_guard(&self.records)?;
        debug!("✓ LogStore PREPEND {} ({})", log.id, log.action);
        records.insert(0, log);
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(read_guard(&self.records)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit_log::LogAction;
    use crate::invoice::InvoiceStatus;
    use crate::user::UserRole;
    use chrono::Utc;

    fn invoice(id: &str) -> Invoice {
        Invoice {
            id: id.to_string(),
            invoice_number: format!("N-{}", id),
            invoice_date: "2024-06-01".to_string(),
            vendor_name: "Vendor".to_string(),
            vendor_email: None,
            po_number: "PO-1".to_string(),
            amount: 10.0,
            tax: 1.0,
            total_amount: 11.0,
            status: InvoiceStatus::Pending,
            line_items: vec![],
            email_id: None,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
            pdf_url: None,
        }
    }

    #[tokio::test]
    async fn test_invoice_store_insert_fetch() {
        let store = InMemoryInvoiceStore::new();
        store.insert(invoice("a")).await.expect("Failed to insert");

        let fetched = store.fetch_by_id("a").await.expect("Failed to fetch");
        assert!(fetched.is_some());
        assert!(store
            .fetch_by_id("missing")
            .await
            .expect("Failed to fetch")
            .is_none());
    }

    #[tokio::test]
    async fn test_invoice_store_duplicate_id_rejected() {
        let store = InMemoryInvoiceStore::new();
        store.insert(invoice("a")).await.expect("Failed to insert");

        let err = store.insert(invoice("a")).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        assert_eq!(store.count().await.expect("Failed to count"), 1);
    }

    #[tokio::test]
    async fn test_invoice_store_replace() {
        let store = InMemoryInvoiceStore::new();
        store.insert(invoice("a")).await.expect("Failed to insert");

        let mut updated = invoice("a");
        updated.vendor_name = "Renamed".to_string();
        store.replace(updated).await.expect("Failed to replace");

        let fetched = store
            .fetch_by_id("a")
            .await
            .expect("Failed to fetch")
            .expect("Record missing");
        assert_eq!(fetched.vendor_name, "Renamed");

        let err = store.replace(invoice("ghost")).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invoice_store_preserves_insertion_order() {
        let store = InMemoryInvoiceStore::new();
        for id in ["a", "b", "c"] {
            store.insert(invoice(id)).await.expect("Failed to insert");
        }

        let all = store.fetch_all().await.expect("Failed to fetch");
        let ids: Vec<&str> = all.iter().map(|inv| inv.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_invoice_store_clone_shares_table() {
        let store = InMemoryInvoiceStore::new();
        let handle = store.clone();
        store.insert(invoice("a")).await.expect("Failed to insert");

        assert_eq!(handle.count().await.expect("Failed to count"), 1);
    }

    #[tokio::test]
    async fn test_user_store_remove() {
        let store = InMemoryUserStore::new();
        store
            .insert(User {
                id: "user-1".to_string(),
                username: "sarah".to_string(),
                email: "sarah@x.com".to_string(),
                role: UserRole::Reviewer,
                created_at: Utc::now(),
            })
            .await
            .expect("Failed to insert");

        store.remove("user-1").await.expect("Failed to remove");
        assert_eq!(store.count().await.expect("Failed to count"), 0);

        let err = store.remove("user-1").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_log_store_prepend_is_head_first() {
        let store = InMemoryLogStore::new();
        for (i, user) in ["first", "second"].iter().enumerate() {
            store
                .prepend(SystemLog {
                    id: format!("LOG-{}", i),
                    username: user.to_string(),
                    action: LogAction::Login,
                    details: None,
                    timestamp: Utc::now(),
                    ip_address: None,
                })
                .await
                .expect("Failed to prepend");
        }

        let all = store.fetch_all().await.expect("Failed to fetch");
        assert_eq!(all[0].username, "second");
        assert_eq!(all[1].username, "first");
    }

    #[tokio::test]
    async fn test_concurrent_inserts() {
        let store = InMemoryInvoiceStore::new();
        let mut handles = vec![];

        for i in 0..10 {
            let store_clone = store.clone();
            handles.push(tokio::spawn(async move {
                store_clone
                    .insert(invoice(&format!("inv-{}", i)))
                    .await
                    .expect("Failed to insert");
            }));
        }

        for handle in handles {
            handle.await.expect("Task failed");
        }

        assert_eq!(store.count().await.expect("Failed to count"), 10);
    }
}
