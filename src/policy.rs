//! Status transition policies for the lifecycle manager.
//!
//! The original service layer never guarded transitions: any status could be
//! written over any other (re-accepting an accepted invoice, accepting a
//! rejected one). That behavior is preserved as the default, and a stricter
//! policy is available as an explicit opt-in. The check lives in a single
//! predicate so call sites never change when the policy does.

use crate::invoice::InvoiceStatus;

/// Policy controlling which status writes the lifecycle manager accepts.
///
/// # The Two Policies
///
/// ```
/// use review_kit::policy::TransitionPolicy;
///
/// // 1. Permissive - any status from any status (source behavior, default)
/// let _p = TransitionPolicy::Permissive;
///
/// // 2. Guarded - only open invoices may move
/// let _p = TransitionPolicy::Guarded;
/// ```
///
/// | Policy | `pending -> accepted` | `rejected -> accepted` | `accepted -> accepted` |
/// |--------|----------------------|------------------------|------------------------|
/// | **Permissive** | allowed | allowed | allowed (idempotent overwrite) |
/// | **Guarded** | allowed | rejected | rejected |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status value may be set from any prior status.
    ///
    /// This is the source system's unguarded re-entrant behavior, preserved
    /// deliberately rather than silently "fixed".
    #[default]
    Permissive,

    /// Only open invoices (`pending`, `in_review`) may change status.
    ///
    /// Settled invoices are final; re-adjudication fails with
    /// [`crate::Error::InvalidTransition`].
    Guarded,
}

impl TransitionPolicy {
    /// The single transition predicate.
    pub fn allows(&self, from: InvoiceStatus, to: InvoiceStatus) -> bool {
        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Guarded => match to {
                InvoiceStatus::InReview
                | InvoiceStatus::Accepted
                | InvoiceStatus::Rejected => from.is_open(),
                // Nothing moves back to pending once picked up
                InvoiceStatus::Pending => false,
            },
        }
    }
}
