//! Limit/offset windows for listing endpoints.

use serde::{Deserialize, Serialize};

/// A limit/offset window applied to an already-ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PageRequest {
    /// Maximum number of items to return (`None` = no limit).
    #[serde(default)]
    pub limit: Option<u64>,
    /// Number of leading items to skip.
    #[serde(default)]
    pub offset: u64,
}

impl PageRequest {
    /// Create a new window.
    pub fn new(limit: Option<u64>, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// A window returning everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Caps the limit at `max`, substituting `default` when none was given.
    pub fn clamped(self, default: u64, max: u64) -> Self {
        Self {
            limit: Some(self.limit.unwrap_or(default).clamp(1, max.max(1))),
            offset: self.offset,
        }
    }

    /// Applies the window to an ordered vector.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let iter = items.into_iter().skip(skip);
        match self.limit {
            Some(limit) => iter
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
            None => iter.collect(),
        }
    }
}

/// A window of items together with the size of the full sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items inside the window.
    pub items: Vec<T>,
    /// Number of items before windowing.
    pub total_items: u64,
    /// The limit that was applied.
    pub limit: Option<u64>,
    /// The offset that was applied.
    pub offset: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Windows `items` with `page`, remembering the full length.
    pub fn from_ordered(items: Vec<T>, page: &PageRequest) -> Self {
        let total_items = items.len() as u64;
        Self {
            items: page.apply(items),
            total_items,
            limit: page.limit,
            offset: page.offset,
        }
    }

    /// Converts the items, keeping the window metadata.
    pub fn map<U: Serialize>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_window() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(PageRequest::new(Some(3), 2).apply(items.clone()), vec![2, 3, 4]);
        assert_eq!(PageRequest::new(None, 8).apply(items.clone()), vec![8, 9]);
        assert!(PageRequest::new(Some(5), 20).apply(items).is_empty());
    }

    #[test]
    fn test_clamped() {
        assert_eq!(PageRequest::all().clamped(25, 100).limit, Some(25));
        assert_eq!(PageRequest::new(Some(500), 0).clamped(25, 100).limit, Some(100));
        assert_eq!(PageRequest::new(Some(0), 0).clamped(25, 100).limit, Some(1));
    }

    #[test]
    fn test_page_response_keeps_total() {
        let page = PageResponse::from_ordered(vec!["a", "b", "c"], &PageRequest::new(Some(1), 1));
        assert_eq!(page.items, vec!["b"]);
        assert_eq!(page.total_items, 3);
    }
}
