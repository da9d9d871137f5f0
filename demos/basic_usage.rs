//! Basic usage example of the review core.
//!
//! Seeds a handful of extracted invoices and an admin account, then walks
//! the two dashboard roles through their flows: the reviewer triages the
//! queue and adjudicates, the admin manages accounts and reads the log.

use chrono::{Duration, Utc};
use review_kit::error::Result;
use review_kit::{
    ids, InMemoryReviewService, Invoice, InvoicePatch, InvoiceStatus, LogAction, NewReviewer,
    PageRequest, User, UserRole,
};

/// Invoices as the email-ingestion pipeline would hand them over.
fn seed_invoices() -> Vec<Invoice> {
    let vendors = [
        ("Acme Supplies", "2024-0101", 1240.00, 102.30),
        ("Globex Logistics", "2024-0102", 89.99, 7.42),
        ("Initech Services", "2024-0103", 4575.50, 377.48),
    ];

    vendors
        .iter()
        .enumerate()
        .map(|(i, (vendor, number, amount, tax))| Invoice {
            id: ids::invoice_id(),
            invoice_number: number.to_string(),
            invoice_date: "2024-06-01".to_string(),
            vendor_name: vendor.to_string(),
            vendor_email: None,
            po_number: format!("PO-{:04}", 9000 + i),
            amount: *amount,
            tax: *tax,
            total_amount: amount + tax,
            status: InvoiceStatus::Pending,
            line_items: vec![],
            email_id: Some(format!("email-{}", i)),
            created_at: Utc::now() - Duration::minutes(30 - i as i64 * 10),
            reviewed_by: None,
            reviewed_at: None,
            pdf_url: None,
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let seed_admin = User {
        id: ids::user_id(),
        username: "admin".to_string(),
        email: "admin@corp.test".to_string(),
        role: UserRole::Admin,
        created_at: Utc::now(),
    };
    let service = InMemoryReviewService::with_seed(seed_invoices(), vec![seed_admin]);

    // --- Admin: onboard a reviewer ---------------------------------------
    println!("=== Admin: create reviewer ===");
    let reviewer = service
        .accounts()
        .create_reviewer(NewReviewer {
            username: "sarah".to_string(),
            email: "sarah@corp.test".to_string(),
        })
        .await?;
    service
        .audit()
        .append(
            "admin",
            LogAction::CreateUser,
            Some(format!("Created reviewer {}", reviewer.username)),
        )
        .await?;
    println!("  created {} ({})", reviewer.username, reviewer.id);

    // --- Reviewer: triage the queue ---------------------------------------
    println!("\n=== Reviewer: work the queue ===");
    let queue = service.query().review_queue().await?;
    println!("  {} invoice(s) waiting", queue.len());

    for (i, invoice) in queue.iter().enumerate() {
        service.lifecycle().start_review(&invoice.id, "sarah").await?;

        if i == 0 {
            // First one has a bad extracted amount; fix it before deciding
            let edited = service
                .edit(
                    &invoice.id,
                    "sarah",
                    InvoicePatch {
                        invoice_number: invoice.invoice_number.clone(),
                        invoice_date: invoice.invoice_date.clone(),
                        vendor_name: invoice.vendor_name.clone(),
                        po_number: invoice.po_number.clone(),
                        amount: 1250.00,
                        tax: 103.13,
                    },
                )
                .await?;
            println!(
                "  corrected {} -> total {:.2}",
                edited.invoice_number, edited.total_amount
            );
        }

        let decided = if i % 2 == 0 {
            service.accept(&invoice.id, "sarah").await?
        } else {
            service.reject(&invoice.id, "sarah").await?
        };
        println!("  {} -> {}", decided.invoice_number, decided.status);
    }

    // --- Dashboards --------------------------------------------------------
    println!("\n=== Dashboards ===");
    let stats = service.query().stats().await?;
    println!(
        "  pending={} in_review={} accepted={} rejected={} total={}",
        stats.pending, stats.in_review, stats.accepted, stats.rejected, stats.total
    );

    let accepted = service
        .query()
        .list(Some(InvoiceStatus::Accepted), PageRequest::first())
        .await?;
    println!("  {} accepted invoice(s) on page 1", accepted.data.len());

    println!("\n=== Recent activity ===");
    for log in service.audit().recent(5).await? {
        println!(
            "  [{}] {} {}",
            log.timestamp.format("%H:%M:%S"),
            log.username,
            log.action
        );
    }

    Ok(())
}
