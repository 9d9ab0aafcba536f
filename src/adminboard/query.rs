//! # Query Engine
//!
//! Derives an ordered, non-owning view of a record slice for a [`Query`].
//!
//! The pipeline is fixed: **search → exact filter → sort**. Changing the order
//! changes results whenever the search and the filter look at the same field,
//! so callers must not rearrange the steps.
//!
//! - Search is a case-insensitive substring match over the record's
//!   [`Record::search_fields`]. An empty term matches everything.
//! - The exact filter compares [`Record::filter_field`] byte for byte. `None` or
//!   an empty string disables it.
//! - Sorting uses `slice::sort_by`, which is stable: records with equal keys
//!   keep their relative input order.
//!
//! Evaluation never mutates its input and never fails. No matches is simply an
//! empty view.

use crate::model::{Record, SortKey};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query<K> {
    pub search_term: String,
    pub exact_filter: Option<String>,
    pub sort: K,
}

impl<K> Query<K> {
    pub fn new(sort: K) -> Self {
        Self {
            search_term: String::new(),
            exact_filter: None,
            sort,
        }
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_filter(mut self, value: impl Into<String>) -> Self {
        self.exact_filter = Some(value.into());
        self
    }

    fn active_filter(&self) -> Option<&str> {
        self.exact_filter.as_deref().filter(|v| !v.is_empty())
    }
}

pub fn evaluate<'a, R: Record>(records: &'a [R], query: &Query<R::Sort>) -> Vec<&'a R> {
    let needle = query.search_term.to_lowercase();

    let mut view: Vec<&R> = records
        .iter()
        .filter(|r| matches_search(*r, &needle))
        .filter(|r| match query.active_filter() {
            Some(value) => r.filter_field() == value,
            None => true,
        })
        .collect();

    view.sort_by(|a, b| query.sort.compare(a, b));
    view
}

fn matches_search<R: Record>(record: &R, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Thread, ThreadSort, User, UserSort};
    use crate::store::memory::fixtures::{sample_thread, sample_user, StoreFixture};
    use crate::store::DataStore;

    fn titles(view: &[&Thread]) -> Vec<String> {
        view.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_sorted() {
        let fixture = StoreFixture::threads(5);
        let view = evaluate(fixture.store.all(), &Query::new(ThreadSort::Oldest));

        assert_eq!(view.len(), 5);
        assert_eq!(view[0].title, "Thread #5");
        assert_eq!(view[4].title, "Thread #1");
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let fixture = StoreFixture::threads(37);
        let query = Query::new(ThreadSort::Newest).with_search("tHrEaD #1");
        let view = evaluate(fixture.store.all(), &query);

        let mut expected = vec!["Thread #1".to_string()];
        expected.extend((10..=19).map(|n| format!("Thread #{}", n)));
        assert_eq!(titles(&view), expected);
    }

    #[test]
    fn search_looks_at_every_configured_field() {
        let fixture = StoreFixture::users(10);
        let by_email = evaluate(
            fixture.store.all(),
            &Query::new(UserSort::Id).with_search("user7@"),
        );
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, 7);

        let by_role = evaluate(
            fixture.store.all(),
            &Query::new(UserSort::Id).with_search("moder"),
        );
        assert!(by_role.iter().all(|u| u.role.as_str() == "Moderator"));
        assert_eq!(by_role.len(), 3);
    }

    #[test]
    fn exact_filter_is_case_sensitive() {
        let fixture = StoreFixture::users(9);
        let admins = evaluate(
            fixture.store.all(),
            &Query::new(UserSort::Id).with_filter("Admin"),
        );
        let ids: Vec<u64> = admins.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 4, 7]);

        let lowercase = evaluate(
            fixture.store.all(),
            &Query::new(UserSort::Id).with_filter("admin"),
        );
        assert!(lowercase.is_empty());
    }

    #[test]
    fn empty_filter_is_a_no_op() {
        let fixture = StoreFixture::users(4);
        let view = evaluate(fixture.store.all(), &Query::new(UserSort::Id).with_filter(""));
        assert_eq!(view.len(), 4);
    }

    #[test]
    fn search_then_filter_compose() {
        let fixture = StoreFixture::users(15);
        let query = Query::new(UserSort::Id)
            .with_search("alice")
            .with_filter("Admin");
        let view = evaluate(fixture.store.all(), &query);

        // Alice is users 1, 6, 11; Admin is users 1, 4, 7, 10, 13.
        let ids: Vec<u64> = view.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        // sample_thread gives n % 7 replies, so #1 and #8 tie, as do #2 and #9.
        let fixture = StoreFixture::threads(9);
        let view = evaluate(fixture.store.all(), &Query::new(ThreadSort::MostReplies));

        let pos = |title: &str| view.iter().position(|t| t.title == title).unwrap();
        assert!(pos("Thread #1") < pos("Thread #8"));
        assert!(pos("Thread #2") < pos("Thread #9"));
    }

    #[test]
    fn evaluation_is_idempotent_and_leaves_input_alone() {
        let fixture = StoreFixture::threads(12);
        let before: Vec<Thread> = fixture.store.all().to_vec();
        let query = Query::new(ThreadSort::FewestReplies).with_search("thread");

        let first: Vec<u64> = evaluate(fixture.store.all(), &query)
            .iter()
            .map(|t| t.id)
            .collect();
        let second: Vec<u64> = evaluate(fixture.store.all(), &query)
            .iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(first, second);
        assert_eq!(fixture.store.all(), before.as_slice());
    }

    #[test]
    fn empty_input_and_no_matches_yield_empty_views() {
        let none: Vec<User> = Vec::new();
        assert!(evaluate(&none, &Query::new(UserSort::Newest)).is_empty());

        let records = vec![sample_user(1), sample_user(2)];
        let query = Query::new(UserSort::Newest).with_search("zzz");
        assert!(evaluate(&records, &query).is_empty());

        let threads = vec![sample_thread(3)];
        let query = Query::new(ThreadSort::Newest).with_filter("Fridge");
        assert!(evaluate(&threads, &query).is_empty());
    }
}
