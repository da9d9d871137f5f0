//! Pagination primitives shared by every list operation.
//!
//! The contract matches the future HTTP surface
//! (`GET /api/...?page=1&pageSize=10`): pages are 1-indexed, a page past the
//! end returns an empty `data` slice without error, and
//! `total_pages = ceil(total / page_size)`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default page size for invoice and user listings.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Default page size for audit log listings.
pub const DEFAULT_LOG_PAGE_SIZE: usize = 20;

/// A validated 1-indexed page request.
///
/// `page == 0` or `page_size == 0` is malformed and fails with
/// [`Error::InvalidArgument`] at validation time. The mock layer this
/// replaces would silently slice nonsense for those inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// First page with the standard listing size.
    pub fn first() -> Self {
        PageRequest {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn new(page: usize, page_size: usize) -> Self {
        PageRequest { page, page_size }
    }

    /// Reject malformed parameters before any store access.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::InvalidArgument(
                "page must be >= 1 (pages are 1-indexed)".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidArgument(
                "pageSize must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results plus the bookkeeping the dashboards need.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> PaginatedResponse<T> {
    /// Slice an already-filtered, already-sorted collection to one page.
    ///
    /// A page beyond `total_pages` yields empty `data` with `total`
    /// unchanged; that is an edge case, not a failure.
    pub fn slice(items: Vec<T>, request: PageRequest) -> Result<Self> {
        request.validate()?;

        let total = items.len();
        let total_pages = total.div_ceil(request.page_size);
        let start = (request.page - 1).saturating_mul(request.page_size);

        let data: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(request.page_size)
            .collect();

        Ok(PaginatedResponse {
            data,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_validation() {
        assert!(PageRequest::new(1, 10).validate().is_ok());
        assert!(matches!(
            PageRequest::new(0, 10).validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            PageRequest::new(1, 0).validate(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_slice_basic() {
        let items: Vec<u32> = (0..25).collect();
        let page = PaginatedResponse::slice(items, PageRequest::new(2, 10))
            .expect("Failed to slice");

        assert_eq!(page.data, (10..20).collect::<Vec<u32>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn test_slice_last_page_partial() {
        let items: Vec<u32> = (0..25).collect();
        let page = PaginatedResponse::slice(items, PageRequest::new(3, 10))
            .expect("Failed to slice");

        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_slice_past_end_is_empty_not_error() {
        let items: Vec<u32> = (0..25).collect();
        let page = PaginatedResponse::slice(items, PageRequest::new(9, 10))
            .expect("Failed to slice");

        assert!(page.data.is_empty());
        assert_eq!(page.total, 25);
    }

    #[test]
    fn test_slice_empty_collection() {
        let page = PaginatedResponse::slice(Vec::<u32>::new(), PageRequest::first())
            .expect("Failed to slice");

        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }
}
