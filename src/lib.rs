//! # review-kit
//!
//! A backend-agnostic invoice review core for role-based dashboards.
//!
//! Vendor invoices are extracted upstream from incoming email and land here
//! in a work queue. Reviewers triage the queue, inspect and edit extracted
//! fields, and accept or reject each invoice; admins manage reviewer
//! accounts and read the audit log. This crate is the core behind those
//! screens: the stores, the queue/list/stats queries, the status lifecycle,
//! and the append-only audit log.
//!
//! ## Features
//!
//! - **Repository Seam:** Components depend on [`store`] traits, never on a
//!   concrete collection; swap in a real database without touching logic
//! - **In-Memory Stores:** Bundled order-preserving stores for tests, demos,
//!   and the pre-database deployment
//! - **Lifecycle Policies:** Permissive (source-faithful) or guarded status
//!   transitions behind a single predicate
//! - **Audit Trail:** Append-only, newest-first log of every decision
//! - **Typed Failures:** `NotFound` / `AlreadyExists` / `Forbidden` /
//!   `InvalidArgument` surface directly to the caller, never swallowed
//!
//! ## Quick Start
//!
//! ```no_run
//! use review_kit::{InMemoryReviewService, InvoicePatch};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = InMemoryReviewService::in_memory();
//!
//!     // Reviewer triages the queue
//!     let queue = service.query().review_queue().await?;
//!     if let Some(invoice) = queue.first() {
//!         service.lifecycle().start_review(&invoice.id, "sarah").await?;
//!
//!         // Fix up an extracted field, then decide
//!         service
//!             .edit(
//!                 &invoice.id,
//!                 "sarah",
//!                 InvoicePatch {
//!                     invoice_number: invoice.invoice_number.clone(),
//!                     invoice_date: invoice.invoice_date.clone(),
//!                     vendor_name: "Acme Supplies Ltd".to_string(),
//!                     po_number: invoice.po_number.clone(),
//!                     amount: 199.99,
//!                     tax: 16.50,
//!                 },
//!             )
//!             .await?;
//!         service.accept(&invoice.id, "sarah").await?;
//!     }
//!
//!     // Admin reads the activity feed
//!     let logs = service.audit().recent(5).await?;
//!     println!("{} recent actions", logs.len());
//!     Ok(())
//! }
//! ```

#[macro_use]
extern crate log;

pub mod accounts;
pub mod audit_log;
pub mod error;
pub mod ids;
pub mod invoice;
pub mod lifecycle;
pub mod page;
pub mod policy;
pub mod query;
pub mod recorder;
pub mod service;
pub mod store;
pub mod user;

// Re-exports for convenience
pub use accounts::AccountDirectory;
pub use audit_log::{LogAction, SystemLog};
pub use error::{Error, Result};
pub use invoice::{Invoice, InvoicePatch, InvoiceStats, InvoiceStatus, LineItem};
pub use lifecycle::InvoiceLifecycle;
pub use page::{PageRequest, PaginatedResponse};
pub use policy::TransitionPolicy;
pub use query::InvoiceQuery;
pub use recorder::AuditRecorder;
pub use service::{InMemoryReviewService, ReviewService};
pub use user::{NewReviewer, User, UserRole};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
