//! Dashboard summary numbers and the chart series behind them.
//!
//! Series are plain `{label, value}` points; drawing them is the renderer's
//! business.

use crate::model::{Role, Thread, User};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Number of days covered by the threads-per-day series.
pub const ACTIVITY_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total_threads: usize,
    pub total_users: usize,
    pub total_replies: u64,
    pub admins: usize,
    pub moderators: usize,
    pub users_by_role: Vec<SeriesPoint>,
    pub threads_per_day: Vec<SeriesPoint>,
}

impl DashboardSummary {
    pub fn compute(threads: &[Thread], users: &[User], now: DateTime<Utc>) -> Self {
        let count_role = |role: Role| users.iter().filter(|u| u.role == role).count();

        let users_by_role = Role::ALL
            .into_iter()
            .map(|role| SeriesPoint {
                label: role.to_string(),
                value: count_role(role) as u64,
            })
            .collect();

        Self {
            total_threads: threads.len(),
            total_users: users.len(),
            total_replies: threads.iter().map(|t| t.reply_count as u64).sum(),
            admins: count_role(Role::Admin),
            moderators: count_role(Role::Moderator),
            users_by_role,
            threads_per_day: threads_per_day(threads, now),
        }
    }
}

/// Threads posted on each of the last [`ACTIVITY_DAYS`] days, oldest first.
fn threads_per_day(threads: &[Thread], now: DateTime<Utc>) -> Vec<SeriesPoint> {
    let today = now.date_naive();
    (0..ACTIVITY_DAYS)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            let value = threads
                .iter()
                .filter(|t| t.author_info.posted_at.date_naive() == day)
                .count() as u64;
            SeriesPoint {
                label: day.format("%m-%d").to_string(),
                value,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{reference_time, StoreFixture};
    use crate::store::DataStore;

    #[test]
    fn summary_counts_records_and_replies() {
        let threads = StoreFixture::threads(10);
        let users = StoreFixture::users(25);
        let summary =
            DashboardSummary::compute(threads.store.all(), users.store.all(), reference_time());

        assert_eq!(summary.total_threads, 10);
        assert_eq!(summary.total_users, 25);
        // n % 7 for n in 1..=10
        assert_eq!(summary.total_replies, 1 + 2 + 3 + 4 + 5 + 6 + 0 + 1 + 2 + 3);
        assert_eq!(summary.admins, 9);
        assert_eq!(summary.moderators, 8);
    }

    #[test]
    fn role_series_covers_every_role() {
        let users = StoreFixture::users(25);
        let summary = DashboardSummary::compute(&[], users.store.all(), reference_time());
        let labels: Vec<&str> = summary.users_by_role.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Admin", "Moderator", "User"]);
        let total: u64 = summary.users_by_role.iter().map(|p| p.value).sum();
        assert_eq!(total, 25);
    }

    #[test]
    fn activity_series_ends_today() {
        // Reference time is noon; threads #1..=12 land today, the rest earlier.
        let threads = StoreFixture::threads(37);
        let summary = DashboardSummary::compute(threads.store.all(), &[], reference_time());

        assert_eq!(summary.threads_per_day.len(), ACTIVITY_DAYS as usize);
        let today = summary.threads_per_day.last().unwrap();
        assert_eq!(today.label, "06-01");
        assert_eq!(today.value, 12);
        let total: u64 = summary.threads_per_day.iter().map(|p| p.value).sum();
        assert_eq!(total, 37);
    }
}
