//! Write side of the invoice store: status transitions and field edits.

use crate::error::{Error, Result};
use crate::invoice::{Invoice, InvoicePatch, InvoiceStatus};
use crate::policy::TransitionPolicy;
use crate::store::InvoiceRepository;
use chrono::Utc;

/// Enforces the invoice state machine and stamps review metadata.
///
/// The manager mutates records only through the repository's atomic
/// `replace`; it does not append audit entries itself — that is the caller's
/// responsibility (the [`crate::service::ReviewService`] facade wires it up).
///
/// # Example
///
/// ```no_run
/// use review_kit::lifecycle::InvoiceLifecycle;
/// use review_kit::store::InMemoryInvoiceStore;
/// use review_kit::InvoiceStatus;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let lifecycle = InvoiceLifecycle::new(InMemoryInvoiceStore::new());
///
///     lifecycle.start_review("INV-001", "sarah").await?;
///     lifecycle
///         .set_status("INV-001", InvoiceStatus::Accepted, "sarah")
///         .await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct InvoiceLifecycle<R: InvoiceRepository> {
    repository: R,
    policy: TransitionPolicy,
}

impl<R: InvoiceRepository> InvoiceLifecycle<R> {
    /// Create a lifecycle manager with the default permissive policy.
    pub fn new(repository: R) -> Self {
        InvoiceLifecycle {
            repository,
            policy: TransitionPolicy::default(),
        }
    }

    /// Override the transition policy.
    pub fn with_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Mark an invoice as being worked on.
    ///
    /// Sets `status = in_review` and stamps `reviewed_by`; `reviewed_at`
    /// stays untouched — it marks the adjudication, not the pickup.
    ///
    /// Future: `POST /api/invoices/:id/start-review`
    ///
    /// # Errors
    /// - `Error::NotFound` if the id is absent
    /// - `Error::InvalidTransition` under the guarded policy
    pub async fn start_review(&self, id: &str, reviewer: &str) -> Result<Invoice> {
        let mut invoice = self.require(id).await?;
        self.check_transition(invoice.status, InvoiceStatus::InReview)?;

        invoice.status = InvoiceStatus::InReview;
        invoice.reviewed_by = Some(reviewer.to_string());

        debug!("Lifecycle START_REVIEW {} by {}", id, reviewer);
        self.repository.replace(invoice.clone()).await?;
        Ok(invoice)
    }

    /// Set an invoice's status (accept/reject) and stamp the decision.
    ///
    /// Stamps `reviewed_by` and `reviewed_at = now` regardless of the status
    /// written. Under the default policy any status may overwrite any other;
    /// re-adjudication is a last-write-wins overwrite, not an error.
    ///
    /// Future: `PATCH /api/invoices/:id/status`
    ///
    /// # Errors
    /// - `Error::NotFound` if the id is absent
    /// - `Error::InvalidTransition` under the guarded policy
    pub async fn set_status(
        &self,
        id: &str,
        status: InvoiceStatus,
        reviewer: &str,
    ) -> Result<Invoice> {
        let mut invoice = self.require(id).await?;
        self.check_transition(invoice.status, status)?;

        invoice.status = status;
        invoice.reviewed_by = Some(reviewer.to_string());
        invoice.reviewed_at = Some(Utc::now());

        info!("Lifecycle SET_STATUS {} -> {} by {}", id, status, reviewer);
        self.repository.replace(invoice.clone()).await?;
        Ok(invoice)
    }

    /// Apply a review-form edit to an invoice's extracted fields.
    ///
    /// Fields are stored verbatim (no format, bounds, or uniqueness checks);
    /// `total_amount` is recomputed as `amount + tax` rather than trusted
    /// from the caller. Status and review stamps are unchanged.
    ///
    /// Future: `PUT /api/invoices/:id`
    ///
    /// # Errors
    /// - `Error::NotFound` if the id is absent
    pub async fn update_fields(&self, id: &str, patch: InvoicePatch) -> Result<Invoice> {
        let mut invoice = self.require(id).await?;
        invoice.apply(patch);

        debug!("Lifecycle UPDATE_FIELDS {}", id);
        self.repository.replace(invoice.clone()).await?;
        Ok(invoice)
    }

    async fn require(&self, id: &str) -> Result<Invoice> {
        self.repository
            .fetch_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("invoice {}", id)))
    }

    fn check_transition(&self, from: InvoiceStatus, to: InvoiceStatus) -> Result<()> {
        if self.policy.allows(from, to) {
            Ok(())
        } else {
            warn!("Lifecycle transition rejected: {} -> {}", from, to);
            Err(Error::InvalidTransition { from, to })
        }
    }
}
