//! # List Views
//!
//! A [`ListView`] is the explicit state of one list screen (Threads or Users):
//! the search box, the filter dropdown, the sort selector and the page cursor.
//! It holds no records. Rendering borrows the store's records, runs them
//! through [`query::evaluate`] and [`Paginator::slice`], and hands back a
//! [`Page`] of references.
//!
//! Every change to the query resets the page to 1, and so does
//! [`ListView::invalidate`], which callers invoke after mutating the store.

use crate::model::Record;
use crate::paginate::{Page, Paginator};
use crate::query::{self, Query};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ListView<K> {
    query: Query<K>,
    paginator: Paginator,
}

impl<K: Copy + Default> ListView<K> {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: Query::new(K::default()),
            paginator: Paginator::new(page_size),
        }
    }

    pub fn query(&self) -> &Query<K> {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.query.search_term = term.into();
        self.paginator.reset();
    }

    pub fn set_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.query.exact_filter = if value.is_empty() { None } else { Some(value) };
        self.paginator.reset();
    }

    pub fn clear_filter(&mut self) {
        self.query.exact_filter = None;
        self.paginator.reset();
    }

    pub fn set_sort(&mut self, sort: K) {
        self.query.sort = sort;
        self.paginator.reset();
    }

    /// The underlying store changed; derived pages are stale.
    pub fn invalidate(&mut self) {
        self.paginator.reset();
    }

    pub fn next_page<R: Record<Sort = K>>(&mut self, records: &[R]) {
        let total = self.total_pages(records);
        self.paginator.next(total);
    }

    pub fn prev_page(&mut self) {
        self.paginator.prev();
    }

    pub fn go_to<R: Record<Sort = K>>(&mut self, page: usize, records: &[R]) {
        let total = self.total_pages(records);
        self.paginator.go_to(page, total);
    }

    pub fn render<'a, R: Record<Sort = K>>(&mut self, records: &'a [R]) -> Page<&'a R> {
        let view = query::evaluate(records, &self.query);
        self.paginator.slice(&view)
    }

    fn total_pages<R: Record<Sort = K>>(&self, records: &[R]) -> usize {
        let len = query::evaluate(records, &self.query).len();
        crate::paginate::total_pages(len, self.paginator.page_size())
    }
}
