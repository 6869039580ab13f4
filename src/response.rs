//! Pagination envelope for list responses.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Derive page metadata from the filtered total. `size` must be at least 1.
    pub fn new(items: Vec<T>, total: u64, page: u32, size: u32) -> Self {
        let pages = total.div_ceil(size as u64);
        Page {
            items,
            total,
            page,
            size,
            pages,
            has_next: (page as u64) < pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_is_consistent_across_combinations() {
        for total in [0u64, 1, 9, 10, 11, 99, 100, 101, 250] {
            for size in [1u32, 3, 10, 100] {
                for page in 1u32..=5 {
                    let p: Page<()> = Page::new(Vec::new(), total, page, size);
                    assert_eq!(p.pages, (total + size as u64 - 1) / size as u64);
                    assert_eq!(p.has_next, (page as u64) < p.pages);
                    assert_eq!(p.has_prev, page > 1);
                }
            }
        }
    }

    #[test]
    fn empty_result_has_no_pages() {
        let p: Page<()> = Page::new(Vec::new(), 0, 1, 10);
        assert_eq!(p.pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn serializes_envelope_keys() {
        let v = serde_json::to_value(Page::new(vec![1, 2], 12, 2, 5)).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "items": [1, 2],
                "total": 12,
                "page": 2,
                "size": 5,
                "pages": 3,
                "has_next": true,
                "has_prev": true
            })
        );
    }
}
