use crate::commands::CmdResult;
use crate::dashboard::DashboardSummary;
use crate::model::{Thread, User};
use crate::store::DataStore;
use chrono::{DateTime, Utc};

pub fn run<T, U>(threads: &T, users: &U, now: DateTime<Utc>) -> CmdResult
where
    T: DataStore<Thread>,
    U: DataStore<User>,
{
    CmdResult {
        dashboard: Some(DashboardSummary::compute(threads.all(), users.all(), now)),
        ..Default::default()
    }
}
