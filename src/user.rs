//! User accounts for the dashboard roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Dashboard role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Manages reviewer accounts, inspects system-wide activity
    Admin,
    /// Triages the queue, edits and adjudicates invoices
    Reviewer,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Reviewer => write!(f, "reviewer"),
        }
    }
}

/// A dashboard account.
///
/// Admin accounts are seed data; only reviewer accounts are created through
/// [`crate::accounts::AccountDirectory`]. Usernames and emails are unique
/// case-insensitively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Form payload for creating a reviewer account.
///
/// Mirrors the future `POST /api/users/reviewer` body. The role is implied;
/// admins cannot be created this way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReviewer {
    pub username: String,
    pub email: String,
}
