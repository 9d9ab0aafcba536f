use super::DataStore;
use crate::error::{AdminError, Result};
use crate::model::Record;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct InMemoryStore<R> {
    records: Vec<R>,
    // Highest id ever issued, so removed ids are never handed out again.
    high_water: u64,
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            high_water: 0,
        }
    }
}

impl<R: Record> InMemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from records already in display order. Ids are assigned
    /// `1..=n` following that order, so the first record gets id 1.
    pub fn seeded(records: Vec<R>) -> Self {
        let records: Vec<R> = records
            .into_iter()
            .zip(1..)
            .map(|(mut record, id)| {
                record.assign_id(id);
                record
            })
            .collect();
        let high_water = records.len() as u64;
        Self {
            records,
            high_water,
        }
    }

    fn next_id(&self) -> u64 {
        let current_max = self.records.iter().map(Record::id).max().unwrap_or(0);
        current_max.max(self.high_water) + 1
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(AdminError::RecordNotFound(id))
    }
}

impl<R: Record> DataStore<R> for InMemoryStore<R> {
    fn insert(&mut self, mut record: R) -> &R {
        let id = self.next_id();
        record.assign_id(id);
        self.high_water = id;
        self.records.insert(0, record);
        debug!(id, total = self.records.len(), "record inserted");
        &self.records[0]
    }

    fn all(&self) -> &[R] {
        &self.records
    }

    fn get(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn update(&mut self, id: u64, patch: R::Patch) -> Result<&R> {
        let idx = self.position(id)?;
        let record = &mut self.records[idx];
        record.apply_patch(patch);
        debug!(id, "record updated");
        Ok(record)
    }

    fn remove(&mut self, id: u64) -> Result<R> {
        let idx = self.position(id)?;
        let removed = self.records.remove(idx);
        debug!(id, total = self.records.len(), "record removed");
        Ok(removed)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{AuthorInfo, Role, Thread, User, DEVICES};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    pub fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    pub fn sample_thread(n: u32) -> Thread {
        Thread::new(
            format!("Thread #{}", n),
            format!("This is the content of thread #{}.", n),
            AuthorInfo {
                posted_at: reference_time() - Duration::hours(n as i64),
                device: DEVICES[n as usize % DEVICES.len()].to_string(),
                ip: format!("10.0.0.{}", n),
            },
        )
        .with_replies(n % 7)
    }

    pub fn sample_user(n: u32) -> User {
        let names = ["Alice", "Bob", "Charlie", "David", "Eve"];
        User::new(
            names[(n as usize - 1) % names.len()],
            format!("user{}@example.com", n),
            Role::ALL[(n as usize - 1) % Role::ALL.len()],
            reference_time() - Duration::days(3 * (n as i64 - 1)),
        )
    }

    pub struct StoreFixture<R> {
        pub store: InMemoryStore<R>,
    }

    impl StoreFixture<Thread> {
        /// Threads #1..=count; thread #n has id n and #1 is on top.
        pub fn threads(count: u32) -> Self {
            Self {
                store: InMemoryStore::seeded((1..=count).map(sample_thread).collect()),
            }
        }
    }

    impl StoreFixture<User> {
        pub fn users(count: u32) -> Self {
            Self {
                store: InMemoryStore::seeded((1..=count).map(sample_user).collect()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{sample_thread, sample_user, StoreFixture};
    use super::*;
    use crate::model::{Patch, Thread, ThreadPatch, User, UserPatch};

    #[test]
    fn insert_assigns_max_plus_one_and_prepends() {
        let mut store: InMemoryStore<Thread> = InMemoryStore::new();
        assert_eq!(store.insert(sample_thread(1)).id, 1);
        assert_eq!(store.insert(sample_thread(2)).id, 2);
        assert_eq!(store.insert(sample_thread(3)).id, 3);

        let ids: Vec<u64> = store.all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn ids_strictly_increase_across_removals() {
        let mut store: InMemoryStore<User> = InMemoryStore::new();
        store.insert(sample_user(1));
        store.insert(sample_user(2));
        store.remove(2).unwrap();

        let next = store.insert(sample_user(3)).id;
        assert_eq!(next, 3);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut fixture = StoreFixture::threads(5);
        let removed = fixture.store.remove(3).unwrap();
        assert_eq!(removed.title, "Thread #3");

        let ids: Vec<u64> = fixture.store.all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }

    #[test]
    fn remove_unknown_id_is_not_found() {
        let mut store: InMemoryStore<Thread> = InMemoryStore::new();
        match store.remove(42) {
            Err(AdminError::RecordNotFound(id)) => assert_eq!(id, 42),
            other => panic!("Expected RecordNotFound, got {:?}", other),
        }
    }

    #[test]
    fn update_patches_in_place() {
        let mut fixture = StoreFixture::users(3);
        let mut patch = UserPatch::default();
        patch.set_field("name", "Zed").unwrap();

        let updated = fixture.store.update(2, patch).unwrap();
        assert_eq!(updated.name, "Zed");
        assert_eq!(updated.id, 2);

        let names: Vec<&str> = fixture.store.all().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Zed", "Charlie"]);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut fixture = StoreFixture::threads(2);
        let result = fixture.store.update(9, ThreadPatch::default());
        assert!(matches!(result, Err(AdminError::RecordNotFound(9))));
    }

    #[test]
    fn seeded_store_numbers_in_display_order() {
        let mut fixture = StoreFixture::threads(37);
        assert_eq!(fixture.store.all()[0].title, "Thread #1");
        assert_eq!(fixture.store.all()[0].id, 1);

        let added = fixture.store.insert(sample_thread(99));
        assert_eq!(added.id, 38);
        assert_eq!(fixture.store.all()[0].id, 38);
    }

    #[test]
    fn get_and_len() {
        let fixture = StoreFixture::threads(4);
        assert_eq!(fixture.store.len(), 4);
        assert!(!fixture.store.is_empty());
        assert_eq!(fixture.store.get(2).unwrap().title, "Thread #2");
        assert!(fixture.store.get(99).is_none());
    }
}
