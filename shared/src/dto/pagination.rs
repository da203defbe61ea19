//! # Pagination
//!
//! Page indices are zero-based on the wire (`?page=0&size=10`). Result pages carry
//! their own totals so callers can clamp navigation without another round trip.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page selector sent as `page`/`size` query parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Build a page request, rejecting a zero page size.
    pub fn new(page: u32, size: u32) -> Result<Self, String> {
        if size == 0 {
            return Err("page size must be greater than 0".to_string());
        }
        Ok(Self { page, size })
    }

    /// First page with the given size.
    pub fn first(size: u32) -> Result<Self, String> {
        Self::new(0, size)
    }

    /// Same size, different page index.
    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Build a page from a slice of `items` and the overall item count, computing
    /// `total_pages` from `total_items` and `size`.
    pub fn new(items: Vec<T>, page: u32, size: u32, total_items: u64) -> Self {
        Self {
            items,
            page,
            size,
            total_items,
            total_pages: total_pages(total_items, size),
        }
    }

    /// Empty first page.
    pub fn empty(size: u32) -> Self {
        Self::new(Vec::new(), 0, size, 0)
    }

    /// Check the page against its own totals.
    ///
    /// `size > 0`, `items.len() <= size` and `total_pages == ceil(total_items / size)`.
    pub fn validate(&self) -> Result<(), String> {
        if self.size == 0 {
            return Err("page size is 0".to_string());
        }
        if self.items.len() > self.size as usize {
            return Err(format!(
                "page holds {} items but size is {}",
                self.items.len(),
                self.size
            ));
        }
        let expected = total_pages(self.total_items, self.size);
        if self.total_pages != expected {
            return Err(format!(
                "totalPages is {} but {} items at size {} make {} pages",
                self.total_pages, self.total_items, self.size, expected
            ));
        }
        Ok(())
    }

    /// Clamp a requested page index into `[0, total_pages - 1]`.
    pub fn clamp_page(&self, page: i64) -> u32 {
        clamp_page(page, self.total_pages)
    }

    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Map the items, keeping the pagination fields.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total_items / size)`, 0 when `size` is 0.
pub fn total_pages(total_items: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp `page` into `[0, total_pages - 1]`; an empty result set clamps to 0.
pub fn clamp_page(page: i64, total_pages: u32) -> u32 {
    if page <= 0 || total_pages == 0 {
        return 0;
    }
    let last = i64::from(total_pages) - 1;
    // Fits: bounded by `total_pages`.
    page.min(last) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(-1, 3), 0);
        assert_eq!(clamp_page(0, 3), 0);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(3, 3), 2);
        assert_eq!(clamp_page(99, 3), 2);
        assert_eq!(clamp_page(4, 0), 0);
    }

    #[test]
    fn test_page_request_rejects_zero_size() {
        assert!(PageRequest::new(0, 0).is_err());
        assert_eq!(PageRequest::new(2, 10).unwrap().with_page(1).page, 1);
    }

    #[test]
    fn test_validate_detects_inconsistent_totals() {
        let page = PaginatedResponse::new(vec![1, 2, 3], 0, 10, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.validate().is_ok());

        let mut bad = page.clone();
        bad.total_pages = 2;
        assert!(bad.validate().is_err());

        let overfull = PaginatedResponse::new(vec![0; 11], 0, 10, 11);
        assert!(overfull.validate().is_err());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let body = r#"{"items":["a"],"page":1,"size":1,"totalItems":3,"totalPages":3}"#;
        let page: PaginatedResponse<String> = serde_json::from_str(body).unwrap();
        assert_eq!(page.total_items, 3);
        assert!(page.has_next());
        assert!(page.has_previous());
    }
}
