//! # Pagination
//!
//! Slices a derived view into fixed-size pages.
//!
//! The paginator clamps on its own: a requested page outside
//! `[1, total_pages]` is pulled back into range instead of being trusted.
//! `total_pages` is never below 1, so page 1 of an empty view is a valid page
//! with no items. A page size of 0 is treated as 1.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

pub fn paginate<T: Clone>(view: &[T], page_number: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(view.len(), page_size);
    let page_number = clamp_page(page_number, total_pages);

    let start = (page_number - 1) * page_size;
    let items = view.iter().skip(start).take(page_size).cloned().collect();

    Page {
        items,
        page_number,
        page_size,
        total_pages,
        total_items: view.len(),
    }
}

/// Page cursor for one list screen.
///
/// Holds only the current page number and the page size; `total_pages` is
/// always supplied by the caller because it depends on the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn next(&mut self, total_pages: usize) {
        self.page = clamp_page(self.page.saturating_add(1), total_pages);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = clamp_page(page, total_pages);
    }

    pub fn clamp(&mut self, total_pages: usize) {
        self.page = clamp_page(self.page, total_pages);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn slice<T: Clone>(&mut self, view: &[T]) -> Page<T> {
        let page = paginate(view, self.page, self.page_size);
        self.page = page.page_number;
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_seven_items_in_pages_of_nine() {
        let view: Vec<u32> = (1..=37).collect();
        assert_eq!(total_pages(view.len(), 9), 5);

        let last = paginate(&view, 5, 9);
        assert_eq!(last.items, vec![37]);
        assert_eq!(last.total_pages, 5);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn page_lengths_follow_the_formula() {
        for len in 0..30usize {
            for size in 1..8usize {
                let view: Vec<usize> = (0..len).collect();
                let pages = total_pages(len, size);
                assert_eq!(pages, len.div_ceil(size).max(1));
                for n in 1..=pages {
                    let page = paginate(&view, n, size);
                    let expected = size.min(len.saturating_sub((n - 1) * size));
                    assert_eq!(page.items.len(), expected, "len={len} size={size} n={n}");
                }
            }
        }
    }

    #[test]
    fn empty_view_has_one_empty_page() {
        let view: Vec<u32> = Vec::new();
        let page = paginate(&view, 1, 9);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_number, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let view: Vec<u32> = (1..=20).collect();
        assert_eq!(paginate(&view, 0, 10).page_number, 1);
        let beyond = paginate(&view, 99, 10);
        assert_eq!(beyond.page_number, 2);
        assert_eq!(beyond.items.first(), Some(&11));
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let view = vec!["a", "b"];
        let page = paginate(&view, 2, 0);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, vec!["b"]);
    }

    #[test]
    fn next_and_prev_saturate_at_bounds() {
        let mut p = Paginator::new(9);
        p.prev();
        assert_eq!(p.page(), 1);

        for _ in 0..10 {
            p.next(5);
        }
        assert_eq!(p.page(), 5);

        p.prev();
        assert_eq!(p.page(), 4);
    }

    #[test]
    fn go_to_clamps_and_reset_returns_to_first_page() {
        let mut p = Paginator::new(10);
        p.go_to(3, 2);
        assert_eq!(p.page(), 2);
        p.go_to(0, 2);
        assert_eq!(p.page(), 1);

        p.go_to(2, 2);
        p.reset();
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn slice_writes_back_the_clamped_page() {
        let mut p = Paginator::new(5);
        p.go_to(4, 4);
        let view: Vec<u32> = (1..=6).collect();
        let page = p.slice(&view);
        assert_eq!(page.page_number, 2);
        assert_eq!(p.page(), 2);
    }
}
