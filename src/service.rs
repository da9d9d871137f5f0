//! High-level review service for web applications.
//!
//! Bundles the query engine, lifecycle manager, account directory, and audit
//! recorder over shared stores, ready to hand to web-framework state.

use crate::accounts::AccountDirectory;
use crate::audit_log::LogAction;
use crate::error::Result;
use crate::invoice::{Invoice, InvoicePatch, InvoiceStatus};
use crate::lifecycle::InvoiceLifecycle;
use crate::policy::TransitionPolicy;
use crate::query::InvoiceQuery;
use crate::recorder::AuditRecorder;
use crate::store::{
    InMemoryInvoiceStore, InMemoryLogStore, InMemoryUserStore, InvoiceRepository, LogRepository,
    UserRepository,
};
use crate::user::User;

/// The whole review core behind one `Clone`-able handle.
///
/// The components share the underlying stores but do not coordinate
/// transactions; each operation is independently atomic at the granularity
/// of a single record update. Cloning the service is cheap and every clone
/// sees the same stores.
///
/// The lifecycle manager never appends audit entries on its own; the
/// [`accept`](ReviewService::accept), [`reject`](ReviewService::reject), and
/// [`edit`](ReviewService::edit) helpers do that wiring for callers that
/// want decision-plus-audit in one call. Callers needing finer control use
/// the components directly.
///
/// # Example
///
/// ```no_run
/// use review_kit::InMemoryReviewService;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let service = InMemoryReviewService::in_memory();
///
///     let queue = service.query().review_queue().await?;
///     for invoice in &queue {
///         println!("{}: {} awaiting review", invoice.id, invoice.vendor_name);
///     }
///
///     let logs = service.audit().recent(5).await?;
///     println!("{} recent audit entries", logs.len());
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ReviewService<I, U, L>
where
    I: InvoiceRepository,
    U: UserRepository,
    L: LogRepository,
{
    query: InvoiceQuery<I>,
    lifecycle: InvoiceLifecycle<I>,
    accounts: AccountDirectory<U>,
    audit: AuditRecorder<L>,
}

/// The service over the bundled in-memory stores.
pub type InMemoryReviewService =
    ReviewService<InMemoryInvoiceStore, InMemoryUserStore, InMemoryLogStore>;

impl InMemoryReviewService {
    /// Empty in-memory service (tests, demos).
    pub fn in_memory() -> Self {
        Self::with_seed(Vec::new(), Vec::new())
    }

    /// In-memory service seeded with invoices and accounts.
    ///
    /// Seed order becomes store order; seed admins here, since the account
    /// directory only creates reviewers.
    pub fn with_seed(invoices: Vec<Invoice>, users: Vec<User>) -> Self {
        Self::new(
            InMemoryInvoiceStore::with_records(invoices),
            InMemoryUserStore::with_records(users),
            InMemoryLogStore::new(),
        )
    }
}

impl<I, U, L> ReviewService<I, U, L>
where
    I: InvoiceRepository,
    U: UserRepository,
    L: LogRepository,
{
    /// Assemble the service over arbitrary repositories.
    pub fn new(invoices: I, users: U, logs: L) -> Self {
        ReviewService {
            query: InvoiceQuery::new(invoices.clone()),
            lifecycle: InvoiceLifecycle::new(invoices),
            accounts: AccountDirectory::new(users),
            audit: AuditRecorder::new(logs),
        }
    }

    /// Override the lifecycle transition policy.
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.lifecycle = self.lifecycle.with_policy(policy);
        self
    }

    /// Accept an invoice and record the decision in the audit log.
    ///
    /// # Errors
    /// Propagates lifecycle errors (`NotFound`, `InvalidTransition`); the
    /// audit entry is only appended after the transition succeeds.
    pub async fn accept(&self, id: &str, reviewer: &str) -> Result<Invoice> {
        let invoice = self
            .lifecycle
            .set_status(id, InvoiceStatus::Accepted, reviewer)
            .await?;
        self.audit
            .append(
                reviewer,
                LogAction::AcceptInvoice,
                Some(format!("Accepted invoice {}", invoice.invoice_number)),
            )
            .await?;
        Ok(invoice)
    }

    /// Reject an invoice and record the decision in the audit log.
    ///
    /// # Errors
    /// Propagates lifecycle errors; the audit entry is only appended after
    /// the transition succeeds.
    pub async fn reject(&self, id: &str, reviewer: &str) -> Result<Invoice> {
        let invoice = self
            .lifecycle
            .set_status(id, InvoiceStatus::Rejected, reviewer)
            .await?;
        self.audit
            .append(
                reviewer,
                LogAction::RejectInvoice,
                Some(format!("Rejected invoice {}", invoice.invoice_number)),
            )
            .await?;
        Ok(invoice)
    }

    /// Edit an invoice's fields and record the edit in the audit log.
    ///
    /// # Errors
    /// Propagates lifecycle errors; the audit entry is only appended after
    /// the update succeeds.
    pub async fn edit(&self, id: &str, reviewer: &str, patch: InvoicePatch) -> Result<Invoice> {
        let invoice = self.lifecycle.update_fields(id, patch).await?;
        self.audit
            .append(
                reviewer,
                LogAction::UpdateInvoice,
                Some(format!("Updated invoice {}", invoice.invoice_number)),
            )
            .await?;
        Ok(invoice)
    }

    /// The query engine.
    pub fn query(&self) -> &InvoiceQuery<I> {
        &self.query
    }

    /// The lifecycle manager.
    pub fn lifecycle(&self) -> &InvoiceLifecycle<I> {
        &self.lifecycle
    }

    /// The account directory.
    pub fn accounts(&self) -> &AccountDirectory<U> {
        &self.accounts
    }

    /// The audit recorder.
    pub fn audit(&self) -> &AuditRecorder<L> {
        &self.audit
    }
}
