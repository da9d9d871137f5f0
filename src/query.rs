//! Read side of the invoice store: list views, the review queue, and stats.

use crate::error::{Error, Result};
use crate::invoice::{Invoice, InvoiceStats, InvoiceStatus};
use crate::page::{PageRequest, PaginatedResponse};
use crate::store::InvoiceRepository;

/// Filtering, sorting, and pagination over the invoice store.
///
/// All reads are derived views; this component never mutates a record.
///
/// # Example
///
/// ```no_run
/// use review_kit::query::InvoiceQuery;
/// use review_kit::page::PageRequest;
/// use review_kit::store::InMemoryInvoiceStore;
/// use review_kit::InvoiceStatus;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let query = InvoiceQuery::new(InMemoryInvoiceStore::new());
///
///     let page = query
///         .list(Some(InvoiceStatus::Pending), PageRequest::first())
///         .await?;
///     println!("{} pending invoices", page.total);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct InvoiceQuery<R: InvoiceRepository> {
    repository: R,
}

impl<R: InvoiceRepository> InvoiceQuery<R> {
    pub fn new(repository: R) -> Self {
        InvoiceQuery { repository }
    }

    /// List invoices, optionally filtered by exact status match.
    ///
    /// Sorted by `created_at` descending; ties keep insertion order (the
    /// sort is stable). Pages are 1-indexed and a page past the end returns
    /// empty `data` without error.
    ///
    /// Future: `GET /api/invoices?status=pending&page=1&pageSize=10`
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for zero `page`/`page_size`
    pub async fn list(
        &self,
        status: Option<InvoiceStatus>,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Invoice>> {
        page.validate()?;

        let mut filtered: Vec<Invoice> = match status {
            Some(wanted) => self
                .repository
                .fetch_all()
                .await?
                .into_iter()
                .filter(|inv| inv.status == wanted)
                .collect(),
            None => self.repository.fetch_all().await?,
        };

        // Newest first; Vec::sort_by is stable, so ties stay in store order
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        debug!(
            "InvoiceQuery LIST status={:?} -> {} match(es)",
            status,
            filtered.len()
        );
        PaginatedResponse::slice(filtered, page)
    }

    /// The review queue: every `pending` or `in_review` invoice.
    ///
    /// Unfiltered, unpaginated, in store order (no sort is applied, matching
    /// the upstream contract for `GET /api/invoices/queue`).
    pub async fn review_queue(&self) -> Result<Vec<Invoice>> {
        Ok(self
            .repository
            .fetch_all()
            .await?
            .into_iter()
            .filter(|inv| inv.status.is_open())
            .collect())
    }

    /// Point lookup.
    ///
    /// Future: `GET /api/invoices/:id`
    ///
    /// # Errors
    /// - `Error::NotFound` if no invoice carries the id
    pub async fn get(&self, id: &str) -> Result<Invoice> {
        self.repository
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("invoice {}", id)))
    }

    /// Per-status counts for the dashboards.
    ///
    /// The counts always partition the store:
    /// `pending + in_review + accepted + rejected == total`.
    pub async fn stats(&self) -> Result<InvoiceStats> {
        let all = self.repository.fetch_all().await?;
        let mut stats = InvoiceStats {
            total: all.len(),
            ..Default::default()
        };

        for invoice in &all {
            match invoice.status {
                InvoiceStatus::Pending => stats.pending += 1,
                InvoiceStatus::InReview => stats.in_review += 1,
                InvoiceStatus::Accepted => stats.accepted += 1,
                InvoiceStatus::Rejected => stats.rejected += 1,
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryInvoiceStore, InvoiceRepository as _};
    use chrono::{Duration, Utc};

    fn invoice(id: &str, status: InvoiceStatus, age_minutes: i64) -> Invoice {
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
            status,
            line_items: vec![],
            email_id: None,
            created_at: Utc::now() - Duration::minutes(age_minutes),
            reviewed_by: None,
            reviewed_at: None,
            pdf_url: None,
        }
    }

    async fn seeded_query() -> InvoiceQuery<InMemoryInvoiceStore> {
        let store = InMemoryInvoiceStore::new();
        for inv in [
            invoice("a", InvoiceStatus::Pending, 30),
            invoice("b", InvoiceStatus::Accepted, 20),
            invoice("c", InvoiceStatus::InReview, 10),
            invoice("d", InvoiceStatus::Rejected, 5),
            invoice("e", InvoiceStatus::Pending, 1),
        ] {
            store.insert(inv).await.expect("Failed to insert");
        }
        InvoiceQuery::new(store)
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first() {
        let query = seeded_query().await;
        let page = query
            .list(None, PageRequest::first())
            .await
            .expect("Failed to list");

        let ids: Vec<&str> = page.data.iter().map(|inv| inv.id.as_str()).collect();
        assert_eq!(ids, vec!["e", "d", "c", "b", "a"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_status_filter_exact() {
        let query = seeded_query().await;
        let page = query
            .list(Some(InvoiceStatus::Pending), PageRequest::first())
            .await
            .expect("Failed to list");

        assert_eq!(page.total, 2);
        assert!(page
            .data
            .iter()
            .all(|inv| inv.status == InvoiceStatus::Pending));
    }

    #[tokio::test]
    async fn test_list_tie_break_keeps_store_order() {
        let store = InMemoryInvoiceStore::new();
        let created = Utc::now();
        for id in ["first", "second", "third"] {
            let mut inv = invoice(id, InvoiceStatus::Pending, 0);
            inv.created_at = created;
            store.insert(inv).await.expect("Failed to insert");
        }

        let page = InvoiceQuery::new(store)
            .list(None, PageRequest::first())
            .await
            .expect("Failed to list");
        let ids: Vec<&str> = page.data.iter().map(|inv| inv.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_list_page_past_end() {
        let query = seeded_query().await;
        let page = query
            .list(None, PageRequest::new(4, 2))
            .await
            .expect("Failed to list");

        assert!(page.data.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_list_rejects_zero_page_size() {
        let query = seeded_query().await;
        let err = query.list(None, PageRequest::new(1, 0)).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_review_queue_membership() {
        let query = seeded_query().await;
        let queue = query.review_queue().await.expect("Failed to fetch queue");

        let ids: Vec<&str> = queue.iter().map(|inv| inv.id.as_str()).collect();
        // Store order, open statuses only
        assert_eq!(ids, vec!["a", "c", "e"]);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let query = seeded_query().await;
        assert_eq!(query.get("a").await.expect("Failed to get").id, "a");

        let err = query.get("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_stats_partition_store() {
        let query = seeded_query().await;
        let stats = query.stats().await.expect("Failed to fetch stats");

        assert_eq!(stats.pending, 2);
        assert_eq!(stats.in_review, 1);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(
            stats.pending + stats.in_review + stats.accepted + stats.rejected,
            stats.total
        );
        assert_eq!(stats.total, 5);
    }
}
