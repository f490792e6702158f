//! Pagination primitives
//!
//! Shared request/response shapes for paged list endpoints. Sorting is
//! always descending; each endpoint whitelists its own sortable fields.

use serde::Serialize;

/// Default page size when the client does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on page size to keep result sets bounded
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request (0-based page index)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a page request, clamping the size into [1, MAX_PAGE_SIZE]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Row offset for SQL `OFFSET`
    #[inline]
    pub fn offset(&self) -> i64 {
        self.page as i64 * self.size as i64
    }

    /// Row limit for SQL `LIMIT`
    #[inline]
    pub fn limit(&self) -> i64 {
        self.size as i64
    }
}

/// One page of results plus paging metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Assemble a page from one query's rows plus a total count
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements <= 0 {
            0
        } else {
            ((total_elements + request.size as i64 - 1) / request.size as i64) as u32
        };
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Map the page content, keeping the metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let req = PageRequest::default();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_size_clamped() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
        assert_eq!(PageRequest::new(0, 10_000).size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(0, 25).size, 25);
    }

    #[test]
    fn test_offset_and_limit() {
        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 30);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn test_total_pages() {
        let req = PageRequest::new(0, 10);
        assert_eq!(Page::new(vec![1], &req, 0).total_pages, 0);
        assert_eq!(Page::new(vec![1], &req, 1).total_pages, 1);
        assert_eq!(Page::new(vec![1], &req, 10).total_pages, 1);
        assert_eq!(Page::new(vec![1], &req, 11).total_pages, 2);
    }

    #[test]
    fn test_map_preserves_metadata() {
        let req = PageRequest::new(1, 2);
        let page = Page::new(vec![1, 2], &req, 5).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_serializes_camel_case() {
        let req = PageRequest::new(0, 10);
        let page = Page::new(vec![1], &req, 1);
        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains("totalElements"));
        assert!(json.contains("totalPages"));
    }
}
