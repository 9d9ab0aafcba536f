//! # API Facade
//!
//! [`AdminApi`] is the single entry point for every interaction, whatever UI
//! drives it. It owns all session state: both stores, one list view and one
//! add flow per list, the shell and the settings form.
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** list operations to the list the shell is showing. List
//!   commands on the Dashboard or Settings view are rejected with
//!   [`AdminError::Api`].
//! - **Supplies the clock**: commands take `now` as an argument, the facade
//!   reads it.
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O operations**: no stdout, stderr or formatting
//!
//! ## Generic Over DataStore
//!
//! `AdminApi<T, U>` is generic over both stores. [`AdminApi::from_config`]
//! builds the usual seeded in-memory pair.

use crate::commands::{self, navigate::SidebarAction, settings::Toggle, CmdResult};
use crate::config::AdminConfig;
use crate::error::{AdminError, Result};
use crate::model::{Thread, ThreadSort, User, UserSort};
use crate::seed::SeedGenerator;
use crate::settings::Settings;
use crate::shell::{Route, Shell};
use crate::store::memory::InMemoryStore;
use crate::store::DataStore;
use crate::view::ListView;
use crate::workflow::{AddRecordFlow, ThreadDraft, UserDraft};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

pub struct AdminApi<T: DataStore<Thread>, U: DataStore<User>> {
    threads: T,
    users: U,
    thread_view: ListView<ThreadSort>,
    user_view: ListView<UserSort>,
    thread_flow: AddRecordFlow<ThreadDraft>,
    user_flow: AddRecordFlow<UserDraft>,
    shell: Shell,
    settings: Settings,
}

impl AdminApi<InMemoryStore<Thread>, InMemoryStore<User>> {
    /// Seeds both stores from `config.seed`, with timestamps relative to `now`.
    pub fn from_config(config: &AdminConfig, now: DateTime<Utc>) -> Self {
        let mut seed = SeedGenerator::new(config.seed, now);
        let threads = seed.thread_store(config.thread_count);
        let users = seed.user_store(config.user_count);
        Self::new(threads, users, config)
    }
}

impl<T: DataStore<Thread>, U: DataStore<User>> AdminApi<T, U> {
    pub fn new(threads: T, users: U, config: &AdminConfig) -> Self {
        Self {
            threads,
            users,
            thread_view: ListView::new(config.threads_page_size),
            user_view: ListView::new(config.users_page_size),
            thread_flow: AddRecordFlow::new(),
            user_flow: AddRecordFlow::new(),
            shell: Shell::new(Duration::from_millis(config.loading_delay_ms)),
            settings: Settings::new(config.site_name.clone()),
        }
    }

    pub fn route(&self) -> Route {
        self.shell.route()
    }

    pub fn threads(&self) -> &T {
        &self.threads
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // --- Shell ---

    /// Navigates and renders the view that was landed on.
    pub fn goto(&mut self, path: &str) -> Result<CmdResult> {
        let nav = commands::navigate::goto(&mut self.shell, path, Instant::now());
        Ok(nav.absorb(self.body()))
    }

    pub fn sidebar(&mut self, action: SidebarAction) -> Result<CmdResult> {
        Ok(commands::navigate::sidebar(
            &mut self.shell,
            action,
            Instant::now(),
        ))
    }

    pub fn header_search(&mut self, term: &str) -> Result<CmdResult> {
        Ok(commands::navigate::header_search(
            &mut self.shell,
            term,
            Instant::now(),
        ))
    }

    /// Renders the current view with the shell around it.
    pub fn show(&mut self) -> Result<CmdResult> {
        let now = Instant::now();
        let frame = CmdResult {
            route: Some(self.shell.route()),
            ..Default::default()
        }
        .with_shell(commands::navigate::status(&self.shell, now));
        Ok(frame.absorb(self.body()))
    }

    fn body(&mut self) -> CmdResult {
        match self.shell.route() {
            Route::Dashboard => commands::dashboard::run(&self.threads, &self.users, Utc::now()),
            Route::Threads => {
                commands::list::run::<Thread, T>(&self.threads, &mut self.thread_view)
            }
            Route::Users => commands::list::run::<User, U>(&self.users, &mut self.user_view),
            Route::Settings => commands::settings::view(&self.settings),
        }
    }

    // --- Lists ---

    pub fn search(&mut self, term: &str) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => Ok(commands::list::search::<Thread, T>(
                &self.threads,
                &mut self.thread_view,
                term,
            )),
            Route::Users => Ok(commands::list::search::<User, U>(
                &self.users,
                &mut self.user_view,
                term,
            )),
            other => Err(not_a_list(other)),
        }
    }

    pub fn filter(&mut self, value: &str) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => Ok(commands::list::filter::<Thread, T>(
                &self.threads,
                &mut self.thread_view,
                value,
            )),
            Route::Users => Ok(commands::list::filter::<User, U>(
                &self.users,
                &mut self.user_view,
                value,
            )),
            other => Err(not_a_list(other)),
        }
    }

    pub fn clear_filter(&mut self) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => Ok(commands::list::clear_filter::<Thread, T>(
                &self.threads,
                &mut self.thread_view,
            )),
            Route::Users => Ok(commands::list::clear_filter::<User, U>(
                &self.users,
                &mut self.user_view,
            )),
            other => Err(not_a_list(other)),
        }
    }

    pub fn sort(&mut self, key: &str) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => {
                commands::list::sort::<Thread, T>(&self.threads, &mut self.thread_view, key)
            }
            Route::Users => {
                commands::list::sort::<User, U>(&self.users, &mut self.user_view, key)
            }
            other => Err(not_a_list(other)),
        }
    }

    pub fn next_page(&mut self) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => Ok(commands::list::next_page::<Thread, T>(
                &self.threads,
                &mut self.thread_view,
            )),
            Route::Users => Ok(commands::list::next_page::<User, U>(
                &self.users,
                &mut self.user_view,
            )),
            other => Err(not_a_list(other)),
        }
    }

    pub fn prev_page(&mut self) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => Ok(commands::list::prev_page::<Thread, T>(
                &self.threads,
                &mut self.thread_view,
            )),
            Route::Users => Ok(commands::list::prev_page::<User, U>(
                &self.users,
                &mut self.user_view,
            )),
            other => Err(not_a_list(other)),
        }
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => Ok(commands::list::go_to_page::<Thread, T>(
                &self.threads,
                &mut self.thread_view,
                page,
            )),
            Route::Users => Ok(commands::list::go_to_page::<User, U>(
                &self.users,
                &mut self.user_view,
                page,
            )),
            other => Err(not_a_list(other)),
        }
    }

    // --- Add flow ---

    pub fn open_add(&mut self) -> Result<CmdResult> {
        let now = Utc::now();
        match self.shell.route() {
            Route::Threads => Ok(commands::add::open::<Thread>(&mut self.thread_flow, now)),
            Route::Users => Ok(commands::add::open::<User>(&mut self.user_flow, now)),
            other => Err(not_a_list(other)),
        }
    }

    pub fn edit_add(&mut self, field: &str, value: &str) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => commands::add::edit::<Thread>(&mut self.thread_flow, field, value),
            Route::Users => commands::add::edit::<User>(&mut self.user_flow, field, value),
            other => Err(not_a_list(other)),
        }
    }

    pub fn submit_add(&mut self) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => commands::add::submit::<Thread, T>(
                &mut self.thread_flow,
                &mut self.threads,
                &mut self.thread_view,
            ),
            Route::Users => commands::add::submit::<User, U>(
                &mut self.user_flow,
                &mut self.users,
                &mut self.user_view,
            ),
            other => Err(not_a_list(other)),
        }
    }

    pub fn cancel_add(&mut self) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => Ok(commands::add::cancel::<Thread>(&mut self.thread_flow)),
            Route::Users => Ok(commands::add::cancel::<User>(&mut self.user_flow)),
            other => Err(not_a_list(other)),
        }
    }

    // --- Record edits ---

    pub fn update(&mut self, id: u64, field: &str, value: &str) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => commands::update::run::<Thread, T>(
                &mut self.threads,
                &mut self.thread_view,
                id,
                field,
                value,
            ),
            Route::Users => commands::update::run::<User, U>(
                &mut self.users,
                &mut self.user_view,
                id,
                field,
                value,
            ),
            other => Err(not_a_list(other)),
        }
    }

    pub fn remove(&mut self, id: u64) -> Result<CmdResult> {
        match self.shell.route() {
            Route::Threads => {
                commands::remove::run::<Thread, T>(&mut self.threads, &mut self.thread_view, id)
            }
            Route::Users => {
                commands::remove::run::<User, U>(&mut self.users, &mut self.user_view, id)
            }
            other => Err(not_a_list(other)),
        }
    }

    // --- Settings ---

    pub fn set_site_name(&mut self, name: &str) -> Result<CmdResult> {
        commands::settings::set_site_name(&mut self.settings, name)
    }

    pub fn toggle(&mut self, which: Toggle) -> Result<CmdResult> {
        Ok(commands::settings::toggle(&mut self.settings, which))
    }

    pub fn save_settings(&self) -> Result<CmdResult> {
        Ok(commands::settings::save(&self.settings))
    }
}

fn not_a_list(route: Route) -> AdminError {
    AdminError::Api(format!(
        "{} has no list; go to /threads or /users first",
        route
    ))
}
