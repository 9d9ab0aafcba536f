//! # Shell State
//!
//! The dashboard chrome: which view is showing, what the header says, and how
//! the sidebar is laid out.
//!
//! ## Routes
//!
//! Paths map onto four views. `/` is the Dashboard, anything starting with
//! `/threads`, `/users` or `/settings` selects that view, and every other path
//! redirects to the Dashboard.
//!
//! ## Sidebar
//!
//! Two independent flags:
//! - `sidebar_open`: the mobile overlay. Closed by an overlay click and by any
//!   route change.
//! - `collapsed`: the desktop rail, which swaps the brand for its initials.
//!
//! ## Loading
//!
//! The first visit to a view shows a short simulated loading state. It is a
//! deferred transition checked against a caller-supplied instant; nothing
//! sleeps and no timer runs.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Route {
    #[default]
    Dashboard,
    Threads,
    Users,
    Settings,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Dashboard, Route::Threads, Route::Users, Route::Settings];

    /// Resolves a path, returning `None` when it has no view of its own.
    pub fn match_path(path: &str) -> Option<Route> {
        let path = path.trim();
        if path == "/" {
            return Some(Route::Dashboard);
        }
        let path = path.strip_suffix('/').unwrap_or(path);
        [Route::Threads, Route::Users, Route::Settings]
            .into_iter()
            .find(|route| path == route.path())
    }

    /// Like [`Route::match_path`], but unknown paths fall back to the Dashboard.
    pub fn from_path(path: &str) -> Route {
        Route::match_path(path).unwrap_or_default()
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Threads => "/threads",
            Route::Users => "/users",
            Route::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Threads => "Threads",
            Route::Users => "Users",
            Route::Settings => "Settings",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Direct(Route),
    Redirected(Route),
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::Direct(r) | Navigation::Redirected(r) => *r,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Shell {
    route: Route,
    sidebar_open: bool,
    collapsed: bool,
    mobile_search_open: bool,
    search_query: String,
    loading_delay: Duration,
    loading_until: Option<Instant>,
    visited: HashSet<Route>,
}

impl Shell {
    pub fn new(loading_delay: Duration) -> Self {
        let mut shell = Self {
            loading_delay,
            ..Default::default()
        };
        shell.visited.insert(Route::Dashboard);
        shell
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn title(&self) -> &'static str {
        self.route.title()
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn mobile_search_open(&self) -> bool {
        self.mobile_search_open
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn brand(&self) -> &'static str {
        if self.collapsed {
            "AP"
        } else {
            "Admin Panel"
        }
    }

    pub fn nav_links(&self) -> Vec<NavLink> {
        Route::ALL
            .into_iter()
            .map(|r| NavLink {
                name: r.title(),
                path: r.path(),
                active: r == self.route,
            })
            .collect()
    }

    /// Switches views. A route change always closes the mobile sidebar.
    pub fn navigate(&mut self, path: &str, now: Instant) -> Navigation {
        let nav = match Route::match_path(path) {
            Some(route) => Navigation::Direct(route),
            None => Navigation::Redirected(Route::default()),
        };
        let route = nav.route();
        debug!(path, %route, redirected = matches!(nav, Navigation::Redirected(_)), "navigate");

        self.route = route;
        self.sidebar_open = false;
        if self.visited.insert(route) && !self.loading_delay.is_zero() {
            self.loading_until = Some(now + self.loading_delay);
        } else {
            self.loading_until = None;
        }
        nav
    }

    pub fn is_loading(&self, now: Instant) -> bool {
        self.loading_until.is_some_and(|until| now < until)
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    pub fn toggle_collapse(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn toggle_mobile_search(&mut self) {
        self.mobile_search_open = !self.mobile_search_open;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }
}
