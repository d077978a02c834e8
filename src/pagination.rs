//! Paged list payloads returned by YesDev query services.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A page of results from a YesDev query service.
///
/// Query services return `{"items": [...], "total": N}`; both fields may be
/// missing when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize"))]
pub struct Page<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Total number of matching items across all pages (if reported).
    #[serde(default, deserialize_with = "crate::serde_utils::opt_i64")]
    pub total: Option<i64>,
}

impl<T> Page<T> {
    /// The reported total, falling back to the number of items on this page.
    #[must_use]
    pub fn total_or_len(&self) -> i64 {
        self.total
            .unwrap_or_else(|| i64::try_from(self.items.len()).unwrap_or(i64::MAX))
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Default page size for query tools.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a tool will request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Paging parameters as the YesDev query services expect them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub perpage: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            perpage: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    /// Resolve optional tool arguments, clamping to sane bounds.
    #[must_use]
    pub fn resolve(page: Option<u32>, perpage: Option<u32>) -> Self {
        let requested = perpage.unwrap_or(DEFAULT_PAGE_SIZE);
        let clamped = requested.clamp(1, MAX_PAGE_SIZE);
        if clamped != requested {
            tracing::debug!(requested, used = clamped, "page size out of range, clamped");
        }
        Self {
            page: page.unwrap_or(1).max(1),
            perpage: clamped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_with_missing_fields() {
        let page: Page<i32> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, None);
        assert_eq!(page.total_or_len(), 0);
    }

    #[test]
    fn test_page_total_as_string() {
        let page: Page<i32> = serde_json::from_str(r#"{"items": [1, 2], "total": "57"}"#).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total_or_len(), 57);
    }

    #[test]
    fn test_pagination_defaults_and_clamping() {
        assert_eq!(PaginationParams::resolve(None, None), PaginationParams::default());
        let p = PaginationParams::resolve(Some(0), Some(500));
        assert_eq!(p.page, 1);
        assert_eq!(p.perpage, MAX_PAGE_SIZE);
    }

    #[test]
    fn in_range_page_size_is_kept() {
        let p = PaginationParams::resolve(Some(3), Some(MAX_PAGE_SIZE));
        assert_eq!(p, PaginationParams { page: 3, perpage: MAX_PAGE_SIZE });
        assert_eq!(PaginationParams::resolve(None, Some(0)).perpage, 1);
    }
}
