//! # Command Layer
//!
//! The operations behind every user interaction. Each command lives in its own
//! submodule as plain functions over stores, list views and flows.
//!
//! ## Role and Responsibilities
//!
//! - Run one interaction to completion: mutate, then invalidate derived views,
//!   in the same call. Readers never see a half-updated store.
//! - Return a structured [`CmdResult`] carrying pages, forms and leveled
//!   messages. The UI decides how to draw them.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr or terminal concerns
//! - **Argument parsing**: that's the CLI layer's job
//! - **Route dispatch**: [`crate::api`] decides which list a command targets
//!
//! ## Generic Over Record Types
//!
//! List commands are written once against [`Listed`], a [`Record`] that knows
//! how to present itself in a [`CmdResult`]. Threads and users share every line
//! of list, add, update and remove logic.
//!
//! ## Testing Strategy
//!
//! This is where most behavior tests live. They use `InMemoryStore` fixtures
//! and check `CmdResult` contents.
//!
//! ## Command Modules
//!
//! - [`list`]: render the current page, search, filter, sort, page moves
//! - [`add`]: drive the add-record flow
//! - [`update`]: patch a record by id
//! - [`remove`]: remove a record by id
//! - [`navigate`]: route changes and sidebar toggles
//! - [`dashboard`]: summary numbers and chart series
//! - [`settings`]: the settings form

use crate::dashboard::DashboardSummary;
use crate::model::{Record, Thread, User};
use crate::paginate::Page;
use crate::settings::Settings;
use crate::shell::{NavLink, Route};
use crate::workflow::{Draft, ThreadDraft, UserDraft};
use serde::Serialize;

pub mod add;
pub mod dashboard;
pub mod list;
pub mod navigate;
pub mod remove;
pub mod settings;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One page of a list view, with the query that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Listing {
    Threads {
        search: String,
        filter: Option<String>,
        sort: String,
        page: Page<Thread>,
    },
    Users {
        search: String,
        filter: Option<String>,
        sort: String,
        page: Page<User>,
    },
}

impl Listing {
    pub fn total_items(&self) -> usize {
        match self {
            Listing::Threads { page, .. } => page.total_items,
            Listing::Users { page, .. } => page.total_items,
        }
    }

    pub fn page_number(&self) -> usize {
        match self {
            Listing::Threads { page, .. } => page.page_number,
            Listing::Users { page, .. } => page.page_number,
        }
    }
}

/// The add form as the UI should draw it.
#[derive(Debug, Clone, Serialize)]
pub struct DraftForm {
    pub noun: &'static str,
    pub fields: Vec<(&'static str, String)>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShellStatus {
    pub title: &'static str,
    pub brand: &'static str,
    pub sidebar_open: bool,
    pub collapsed: bool,
    pub mobile_search_open: bool,
    pub search_query: String,
    pub loading: bool,
    pub links: Vec<NavLink>,
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub route: Option<Route>,
    pub shell: Option<ShellStatus>,
    pub listing: Option<Listing>,
    pub form: Option<DraftForm>,
    pub dashboard: Option<DashboardSummary>,
    pub settings: Option<Settings>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listing(mut self, listing: Listing) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_form(mut self, form: DraftForm) -> Self {
        self.form = Some(form);
        self
    }

    pub fn with_shell(mut self, shell: ShellStatus) -> Self {
        self.shell = Some(shell);
        self
    }

    /// Moves every part `other` carries into `self`, appending its messages.
    pub fn absorb(mut self, other: CmdResult) -> Self {
        self.route = other.route.or(self.route);
        self.shell = other.shell.or(self.shell);
        self.listing = other.listing.or(self.listing);
        self.form = other.form.or(self.form);
        self.dashboard = other.dashboard.or(self.dashboard);
        self.settings = other.settings.or(self.settings);
        self.messages.extend(other.messages);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Error))
    }
}

/// A record type that can be listed, added, updated and removed.
pub trait Listed: Record {
    /// Singular noun used in messages ("thread", "user").
    const NOUN: &'static str;

    type Draft: Draft<Output = Self>;

    fn listing(query: &crate::query::Query<Self::Sort>, page: Page<Self>) -> Listing;

    fn form_fields(draft: &Self::Draft) -> Vec<(&'static str, String)>;
}

impl Listed for Thread {
    const NOUN: &'static str = "thread";

    type Draft = ThreadDraft;

    fn listing(query: &crate::query::Query<Self::Sort>, page: Page<Self>) -> Listing {
        Listing::Threads {
            search: query.search_term.clone(),
            filter: query.exact_filter.clone(),
            sort: query.sort.to_string(),
            page,
        }
    }

    fn form_fields(draft: &ThreadDraft) -> Vec<(&'static str, String)> {
        vec![
            ("title", draft.title.clone()),
            ("content", draft.content.clone()),
            ("device", draft.device.clone()),
        ]
    }
}

impl Listed for User {
    const NOUN: &'static str = "user";

    type Draft = UserDraft;

    fn listing(query: &crate::query::Query<Self::Sort>, page: Page<Self>) -> Listing {
        Listing::Users {
            search: query.search_term.clone(),
            filter: query.exact_filter.clone(),
            sort: query.sort.to_string(),
            page,
        }
    }

    fn form_fields(draft: &UserDraft) -> Vec<(&'static str, String)> {
        vec![
            ("name", draft.name.clone()),
            ("email", draft.email.clone()),
            ("role", draft.role.to_string()),
            ("joined", draft.joined_at.format("%Y-%m-%d").to_string()),
        ]
    }
}
