//! In-memory pagination
//!
//! Slices an already loaded list into a page. Both the category listing and
//! the product listing go through [`paginate`].

use serde::Serialize;

/// Page size used when a request does not name one
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// A request for one page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: usize,
    /// Number of items per page, never zero
    pub size: usize,
}

impl PageRequest {
    /// Build a request from a zero-based page index. A zero size becomes 1.
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    /// Build a request from the one-based `page`/`size` query parameters.
    ///
    /// A missing or non-positive page is page 1. A missing size is
    /// [`DEFAULT_PAGE_SIZE`], a non-positive one is clamped to 1.
    pub fn from_query(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let size = size
            .map(|s| s.max(1) as usize)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self::new((page - 1) as usize, size)
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of items together with the size of the full list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page index
    pub page: usize,
    pub size: usize,
    /// Length of the full list
    pub total: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.size)
    }

    /// One-based page numbers for rendering a pager, empty when there is nothing to show
    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages()).collect()
    }

    /// One-based number of this page
    pub fn current_page(&self) -> usize {
        self.page + 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every item, keeping the paging information
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }
}

/// Cut `items` down to the page described by `request`.
///
/// A page starting past the end of the list is empty; `total` is always the
/// length of `items`.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let start = request.offset();

    let items = if start >= total {
        Vec::new()
    } else {
        items.into_iter().skip(start).take(request.size).collect()
    };

    Page {
        items,
        page: request.page,
        size: request.size,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seven() -> Vec<u32> {
        (0..7).collect()
    }

    #[test]
    fn second_page_of_seven_items() {
        let page = paginate(seven(), PageRequest::from_query(Some(2), Some(3)));

        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.page_numbers(), vec![1, 2, 3]);
        assert_eq!(page.current_page(), 2);
    }

    #[test]
    fn last_page_is_partial() {
        let page = paginate(seven(), PageRequest::new(2, 3));
        assert_eq!(page.items, vec![6]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        for index in [3, 4, 100] {
            let page = paginate(seven(), PageRequest::new(index, 3));
            assert!(page.is_empty());
            assert_eq!(page.total, 7);
        }
    }

    #[test]
    fn in_range_pages_hold_min_of_size_and_remaining() {
        let items = seven();
        for size in 1..=8 {
            for index in 0..(items.len() / size + 1) {
                let request = PageRequest::new(index, size);
                let start = request.offset();
                let page = paginate(items.clone(), request);
                if start < items.len() {
                    assert_eq!(page.items.len(), size.min(items.len() - start));
                    assert_eq!(page.items[0], items[start]);
                } else {
                    assert!(page.is_empty());
                }
            }
        }
    }

    #[test]
    fn empty_list_has_no_pages() {
        let page = paginate(Vec::<u32>::new(), PageRequest::new(0, DEFAULT_PAGE_SIZE));
        assert!(page.is_empty());
        assert_eq!(page.total_pages(), 0);
        assert!(page.page_numbers().is_empty());
    }

    #[test]
    fn query_defaults_and_clamping() {
        assert_eq!(PageRequest::from_query(None, None), PageRequest::new(0, 3));
        assert_eq!(PageRequest::from_query(Some(0), Some(0)), PageRequest::new(0, 1));
        assert_eq!(PageRequest::from_query(Some(2), Some(-7)), PageRequest::new(1, 1));
        assert_eq!(PageRequest::from_query(Some(1), None), PageRequest::new(0, 3));
        assert_eq!(PageRequest::from_query(Some(-4), Some(5)), PageRequest::new(0, 5));
        assert_eq!(PageRequest::new(1, 0).size, 1);
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        let page = paginate(seven(), PageRequest::new(usize::MAX, 3));
        assert!(page.is_empty());
    }

    #[test]
    fn map_keeps_paging_information() {
        let page = paginate(seven(), PageRequest::new(1, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![20, 30]);
        assert_eq!(page.total, 7);
        assert_eq!(page.page, 1);
    }
}
