//! # Pagination
//!
//! History is ordered newest first, ties broken by ascending hash, so
//! sequential pages over an unchanged candidate list neither repeat nor
//! skip a transaction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use shared_types::Hash;

use super::errors::HistoryError;

/// One-based page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_no: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page_no: usize, page_size: usize) -> Self {
        Self { page_no, page_size }
    }

    /// Reject `page_no == 0`, `page_size == 0` and sizes above `max_page_size`.
    pub fn validate(&self, max_page_size: usize) -> Result<(), HistoryError> {
        if self.page_no == 0 || self.page_size == 0 || self.page_size > max_page_size {
            return Err(HistoryError::InvalidPage {
                page_no: self.page_no,
                page_size: self.page_size,
                max_page_size,
            });
        }
        Ok(())
    }

    /// Number of candidates before this page.
    pub fn skip(&self) -> usize {
        self.page_no.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// A page of results with the size of the full candidate list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> PaginationResult<T> {
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            items: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginationResult<U> {
        PaginationResult {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Slice an ordered candidate list.
///
/// A page past the end is empty and still reports the full count.
pub fn paginate<T: Clone>(candidates: &[T], page: &PageRequest) -> PaginationResult<T> {
    let items = candidates
        .iter()
        .skip(page.skip())
        .take(page.page_size)
        .cloned()
        .collect();

    PaginationResult {
        total_count: candidates.len() as u64,
        items,
    }
}

/// History order: timestamp descending, then hash ascending.
pub fn history_order(a: (u64, &Hash), b: (u64, &Hash)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_reassemble_candidates() {
        let candidates: Vec<u32> = (0..25).collect();
        let mut collected = Vec::new();
        for page_no in 1..=3 {
            let page = paginate(&candidates, &PageRequest::new(page_no, 10));
            assert_eq!(page.total_count, 25);
            collected.extend(page.items);
        }
        assert_eq!(collected, candidates);

        let past_end = paginate(&candidates, &PageRequest::new(4, 10));
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_count, 25);
    }

    #[test]
    fn test_validate() {
        assert!(PageRequest::new(1, 10).validate(100).is_ok());
        assert!(PageRequest::new(0, 10).validate(100).is_err());
        assert!(PageRequest::new(1, 0).validate(100).is_err());
        assert!(PageRequest::new(1, 101).validate(100).is_err());
    }

    #[test]
    fn test_skip_saturates() {
        let page = PageRequest::new(usize::MAX, usize::MAX);
        assert_eq!(page.skip(), usize::MAX);
        assert!(paginate(&[1, 2, 3], &page).items.is_empty());
    }

    #[test]
    fn test_history_order() {
        let (h1, h2) = ([1u8; 32], [2u8; 32]);
        assert_eq!(history_order((10, &h1), (5, &h1)), Ordering::Less);
        assert_eq!(history_order((5, &h2), (5, &h1)), Ordering::Greater);
        assert_eq!(history_order((5, &h1), (5, &h1)), Ordering::Equal);
    }

    #[test]
    fn test_result_json_is_camel_case() {
        let json = serde_json::to_value(PaginationResult::<u8>::empty()).unwrap();
        assert_eq!(json["totalCount"], 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pages_partition_candidates(len in 0usize..200, page_size in 1usize..50) {
                let candidates: Vec<usize> = (0..len).collect();
                let pages = len.div_ceil(page_size);
                let mut collected = Vec::new();
                for page_no in 1..=pages {
                    let page = paginate(&candidates, &PageRequest::new(page_no, page_size));
                    prop_assert_eq!(page.total_count, len as u64);
                    collected.extend(page.items);
                }
                prop_assert_eq!(collected, candidates.clone());
                let beyond = paginate(&candidates, &PageRequest::new(pages + 1, page_size));
                prop_assert!(beyond.items.is_empty());
            }
        }
    }
}
