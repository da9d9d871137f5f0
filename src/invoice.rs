//! Invoice records and the fields extracted from incoming vendor email.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Where an invoice stands in the review workflow.
///
/// Invoices are ingested in `Pending` state by the upstream email pipeline.
/// A reviewer moves them to `InReview` while working, then settles them as
/// `Accepted` or `Rejected`. Serialized snake_case (`in_review` on the wire).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Waiting for a reviewer to pick it up
    Pending,
    /// A reviewer has started working on it
    InReview,
    /// Adjudicated: invoice approved
    Accepted,
    /// Adjudicated: invoice declined
    Rejected,
}

impl InvoiceStatus {
    /// True for statuses that belong in the review queue.
    pub fn is_open(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::InReview)
    }
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::InReview => write!(f, "in_review"),
            InvoiceStatus::Accepted => write!(f, "accepted"),
            InvoiceStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "in_review" => Ok(InvoiceStatus::InReview),
            "accepted" => Ok(InvoiceStatus::Accepted),
            "rejected" => Ok(InvoiceStatus::Rejected),
            other => Err(format!("unknown invoice status: {}", other)),
        }
    }
}

/// One billed item within an invoice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl LineItem {
    /// Whether `total` agrees with `quantity * unit_price` to the cent.
    ///
    /// Extraction output is stored verbatim and never corrected; this is a
    /// convenience for pipelines that want to flag inconsistent items.
    pub fn is_consistent(&self) -> bool {
        (self.total - self.quantity * self.unit_price).abs() < 0.005
    }
}

/// A vendor bill with extracted structured fields awaiting human review.
///
/// Created externally by the email-ingestion pipeline in `Pending` status,
/// mutated only through [`crate::lifecycle::InvoiceLifecycle`], never deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Opaque, unique, immutable
    pub id: String,
    pub invoice_number: String,
    pub invoice_date: String,
    pub vendor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_email: Option<String>,
    pub po_number: String,
    /// Pre-tax amount
    pub amount: f64,
    pub tax: f64,
    /// Always `amount + tax`; recomputed on every field update
    pub total_amount: f64,
    pub status: InvoiceStatus,
    pub line_items: Vec<LineItem>,
    /// Link back to the source email, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    /// Set at ingestion, immutable
    pub created_at: DateTime<Utc>,
    /// Username of the reviewer who last touched this invoice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    /// Set on accept/reject only; `start_review` does not stamp it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Pointer to the source document, purely presentational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

impl Invoice {
    /// Apply an edit form and restore the monetary invariant.
    ///
    /// Descriptive fields are stored verbatim (no format or uniqueness
    /// checks); `total_amount` is recomputed rather than trusted from the
    /// caller. Status and review stamps are untouched.
    pub(crate) fn apply(&mut self, patch: InvoicePatch) {
        self.invoice_number = patch.invoice_number;
        self.invoice_date = patch.invoice_date;
        self.vendor_name = patch.vendor_name;
        self.po_number = patch.po_number;
        self.amount = patch.amount;
        self.tax = patch.tax;
        self.total_amount = patch.amount + patch.tax;
    }
}

/// Editable invoice fields, as submitted from the review form.
///
/// Whole-form semantics: every field is supplied on each edit, mirroring the
/// future `PUT /api/invoices/:id` body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub invoice_number: String,
    pub invoice_date: String,
    pub vendor_name: String,
    pub po_number: String,
    pub amount: f64,
    pub tax: f64,
}

/// Per-status counts for the dashboards.
///
/// Invariant: `pending + in_review + accepted + rejected == total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    pub pending: usize,
    pub in_review: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub total: usize,
}
