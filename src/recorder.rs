//! Append-only audit recorder, consumed by the admin dashboards.

use crate::audit_log::{LogAction, SystemLog};
use crate::error::{Error, Result};
use crate::ids;
use crate::page::{PageRequest, PaginatedResponse};
use crate::store::LogRepository;
use chrono::Utc;

/// Records user-initiated actions and serves the log views.
///
/// Appends are treated as infallible beyond propagated repository errors:
/// there is no retry, no fallback, and no retention policy (the log grows
/// unbounded; a persistent deployment should decide one).
#[derive(Clone)]
pub struct AuditRecorder<R: LogRepository> {
    repository: R,
}

impl<R: LogRepository> AuditRecorder<R> {
    pub fn new(repository: R) -> Self {
        AuditRecorder { repository }
    }

    /// Append a record with a fresh id and the current timestamp.
    ///
    /// The record lands at the head of the collection (most-recent-first
    /// physical ordering). `ip_address` is left unset; it belongs to the
    /// server edge, not this core.
    ///
    /// Future: `POST /api/logs` (internal-only, called by other endpoints)
    pub async fn append(
        &self,
        username: &str,
        action: LogAction,
        details: Option<String>,
    ) -> Result<SystemLog> {
        let log = SystemLog {
            id: ids::log_id(),
            username: username.to_string(),
            action,
            details,
            timestamp: Utc::now(),
            ip_address: None,
        };

        debug!("Audit APPEND {} {} by {}", log.id, action, username);
        self.repository.prepend(log.clone()).await?;
        Ok(log)
    }

    /// Paginated log listing, optionally filtered by action.
    ///
    /// Sorted by `timestamp` descending; same pagination contract as the
    /// invoice listing.
    ///
    /// Future: `GET /api/logs?action=login&page=1&pageSize=20`
    ///
    /// # Errors
    /// - `Error::InvalidArgument` for zero `page`/`page_size`
    pub async fn list(
        &self,
        action: Option<LogAction>,
        page: PageRequest,
    ) -> Result<PaginatedResponse<SystemLog>> {
        page.validate()?;

        let mut filtered: Vec<SystemLog> = match action {
            Some(wanted) => self
                .repository
                .fetch_all()
                .await?
                .into_iter()
                .filter(|log| log.action == wanted)
                .collect(),
            None => self.repository.fetch_all().await?,
        };

        filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        PaginatedResponse::slice(filtered, page)
    }

    /// The `limit` most recent entries, newest first.
    ///
    /// Future: `GET /api/logs/recent?limit=5`
    ///
    /// # Errors
    /// - `Error::InvalidArgument` if `limit == 0`
    pub async fn recent(&self, limit: usize) -> Result<Vec<SystemLog>> {
        if limit == 0 {
            return Err(Error::InvalidArgument("limit must be >= 1".to_string()));
        }

        let mut all = self.repository.fetch_all().await?;
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        all.truncate(limit);
        Ok(all)
    }

    /// Every entry for an exact username match, in store order.
    ///
    /// Future: `GET /api/logs?username=john.reviewer`
    pub async fn by_user(&self, username: &str) -> Result<Vec<SystemLog>> {
        Ok(self
            .repository
            .fetch_all()
            .await?
            .into_iter()
            .filter(|log| log.username == username)
            .collect())
    }
}
