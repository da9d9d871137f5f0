//! Audit log records for user-initiated actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The actions recorded in the audit log.
///
/// Serialized snake_case to match the future `system_logs.action` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    Login,
    Logout,
    CreateUser,
    AcceptInvoice,
    RejectInvoice,
    ViewInvoice,
    UpdateInvoice,
}

impl Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogAction::Login => write!(f, "login"),
            LogAction::Logout => write!(f, "logout"),
            LogAction::CreateUser => write!(f, "create_user"),
            LogAction::AcceptInvoice => write!(f, "accept_invoice"),
            LogAction::RejectInvoice => write!(f, "reject_invoice"),
            LogAction::ViewInvoice => write!(f, "view_invoice"),
            LogAction::UpdateInvoice => write!(f, "update_invoice"),
        }
    }
}

/// One append-only audit record.
///
/// Ordering for display is newest-first by `timestamp`; the store keeps
/// records head-first so `recent` is a cheap prefix read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemLog {
    pub id: String,
    pub username: String,
    pub action: LogAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
    /// Captured server-side in a real deployment; absent in this core
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}
