//! Page-number pagination primitives.
//!
//! The upstream backend paginates every collection endpoint with
//! `page`/`limit` query parameters and reports `{page, totalPages, total}`
//! alongside the data. This crate holds the shared request/metadata types and
//! the arithmetic, so gateways and screens agree on the semantics:
//!
//! - pages are 1-based;
//! - `total_pages` is the ceiling of `total / limit`, zero when empty;
//! - a page past the end is an empty page, never an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default page size used when a request does not specify one.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size the dashboard will request from the backend.
pub const MAX_LIMIT: u32 = 100;

/// Validation errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Pages are 1-based; zero is not a page.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// A zero limit would make every collection unreachable.
    #[error("page size must be at least 1")]
    ZeroLimit,
    /// Limits beyond [`MAX_LIMIT`] are rejected rather than clamped silently.
    #[error("page size must not exceed {MAX_LIMIT}")]
    LimitTooLarge,
}

/// A 1-based page request with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Construct a request, validating both fields.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when the page is zero or the limit is
    /// zero or larger than [`MAX_LIMIT`].
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PageRequestError::LimitTooLarge);
        }
        Ok(Self { page, limit })
    }

    /// Build a request from untrusted query input, falling back to the
    /// defaults and clamping the limit instead of failing the whole page.
    #[must_use]
    pub fn lenient(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|value| *value >= 1).unwrap_or(1);
        let limit = limit
            .filter(|value| *value >= 1)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        Self { page, limit }
    }

    /// The requested 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The requested page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip to reach this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// Pagination metadata reported alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The 1-based page this metadata describes.
    pub page: u32,
    /// Total number of pages in the collection at the given limit.
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

impl PageInfo {
    /// Compute metadata for a collection of `total` items at `limit` per
    /// page.
    #[must_use]
    pub const fn compute(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64) as u32
        };
        Self {
            page,
            total_pages,
            total,
        }
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page, at most `limit` of them.
    pub items: Vec<T>,
    /// Position of this page within the collection.
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// An empty page with zeroed totals, used when an upstream response
    /// carries no pagination metadata.
    #[must_use]
    pub const fn empty(page: u32) -> Self {
        Self {
            items: Vec::new(),
            info: PageInfo {
                page,
                total_pages: 0,
                total: 0,
            },
        }
    }

    /// Slice an in-memory collection into the requested page.
    ///
    /// Requests past the last page produce an empty item list with the
    /// collection totals intact, mirroring the backend's behaviour.
    #[must_use]
    pub fn slice(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len() as u64;
        let info = PageInfo::compute(request.page(), request.limit(), total);
        let items = items
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.limit() as usize)
            .collect();
        Self { items, info }
    }

    /// Map the items while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pagination arithmetic.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact(30, 10, 3)]
    #[case::remainder(25, 10, 3)]
    #[case::single(1, 10, 1)]
    #[case::empty(0, 10, 0)]
    #[case::limit_one(7, 1, 7)]
    fn computes_ceiling_page_totals(#[case] total: u64, #[case] limit: u32, #[case] pages: u32) {
        let info = PageInfo::compute(1, limit, total);
        assert_eq!(info.total_pages, pages);
        assert_eq!(info.total, total);
    }

    #[test]
    fn page_two_of_twenty_five_items_has_three_pages() {
        let request = PageRequest::new(2, 10).expect("valid request");
        let page = Page::slice((0..25).collect::<Vec<_>>(), request);
        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert!(page.info.has_next());
        assert!(page.info.has_previous());
    }

    #[test]
    fn page_beyond_the_end_is_empty_not_an_error() {
        let request = PageRequest::new(4, 10).expect("valid request");
        let page = Page::slice((0..25).collect::<Vec<_>>(), request);
        assert!(page.items.is_empty());
        assert_eq!(page.info.total, 25);
        assert_eq!(page.info.total_pages, 3);
        assert!(!page.info.has_next());
    }

    #[rstest]
    #[case::zero_page(0, 10, PageRequestError::ZeroPage)]
    #[case::zero_limit(1, 0, PageRequestError::ZeroLimit)]
    #[case::oversized(1, 101, PageRequestError::LimitTooLarge)]
    fn rejects_invalid_requests(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PageRequestError,
    ) {
        let err = PageRequest::new(page, limit).expect_err("must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case::all_defaults(None, None, 1, DEFAULT_LIMIT)]
    #[case::zero_page_falls_back(Some(0), Some(20), 1, 20)]
    #[case::oversized_limit_clamped(Some(3), Some(500), 3, MAX_LIMIT)]
    fn lenient_construction_never_fails(
        #[case] page: Option<u32>,
        #[case] limit: Option<u32>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request = PageRequest::lenient(page, limit);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[test]
    fn offset_skips_whole_pages() {
        let request = PageRequest::new(3, 10).expect("valid request");
        assert_eq!(request.offset(), 20);
    }

    #[test]
    fn serialises_total_pages_in_camel_case() {
        let info = PageInfo::compute(2, 10, 25);
        let json = serde_json::to_value(&info).expect("serialisable");
        assert_eq!(json["totalPages"], 3);
    }
}
