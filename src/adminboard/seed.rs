//! Deterministic mock data.
//!
//! All randomness comes from a [`StdRng`] seeded with a caller-supplied `u64`,
//! and all timestamps are offsets from a caller-supplied `now`. The same seed
//! and the same `now` always produce the same records.

use crate::model::{AuthorInfo, Role, Thread, User, DEVICES};
use crate::store::memory::InMemoryStore;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

const USER_NAMES: [&str; 5] = ["Alice", "Bob", "Charlie", "David", "Eve"];
const MAX_REPLIES: u32 = 50;

pub struct SeedGenerator {
    rng: StdRng,
    now: DateTime<Utc>,
}

impl SeedGenerator {
    pub fn new(seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            now,
        }
    }

    /// `Thread #1..=count`, newest first; thread `n` was posted `n` hours ago.
    pub fn threads(&mut self, count: u32) -> Vec<Thread> {
        (1..=count)
            .map(|n| {
                let device = DEVICES[self.rng.random_range(0..DEVICES.len())];
                let ip = format!(
                    "192.168.{}.{}",
                    self.rng.random_range(0..=255u8),
                    self.rng.random_range(1..=254u8)
                );
                Thread::new(
                    format!("Thread #{}", n),
                    format!("This is the content of thread #{}.", n),
                    AuthorInfo {
                        posted_at: self.now - Duration::hours(n as i64),
                        device: device.to_string(),
                        ip,
                    },
                )
                .with_replies(self.rng.random_range(0..=MAX_REPLIES))
            })
            .collect()
    }

    /// `count` users, newest first; user `n` joined `3 * (n - 1)` days ago.
    pub fn users(&mut self, count: u32) -> Vec<User> {
        (0..count as usize)
            .map(|idx| {
                User::new(
                    USER_NAMES[idx % USER_NAMES.len()],
                    format!("user{}@example.com", idx + 1),
                    Role::ALL[idx % Role::ALL.len()],
                    self.now - Duration::days(3 * idx as i64),
                )
            })
            .collect()
    }

    pub fn thread_store(&mut self, count: u32) -> InMemoryStore<Thread> {
        debug!(count, "seeding threads");
        InMemoryStore::seeded(self.threads(count))
    }

    pub fn user_store(&mut self, count: u32) -> InMemoryStore<User> {
        debug!(count, "seeding users");
        InMemoryStore::seeded(self.users(count))
    }
}
