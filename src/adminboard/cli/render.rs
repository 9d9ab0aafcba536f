//! # Rendering Module
//!
//! Turns a [`CmdResult`] into terminal text. Each part of the result (shell
//! header, list page, add form, dashboard, settings, messages) has its own
//! template; present parts are rendered in that order and joined with a blank
//! line.
//!
//! Width calculations stay in Rust because they need Unicode-aware
//! processing. Templates select styles through the `style` filter, which is a
//! no-op when color is off.

use super::styles::{Theme, ADMIN_THEME};
use super::templates::{
    DASHBOARD_TEMPLATE, FORM_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, SETTINGS_TEMPLATE,
    SHELL_TEMPLATE,
};
use adminboard::commands::{CmdMessage, CmdResult, DraftForm, Listing, MessageLevel, ShellStatus};
use adminboard::dashboard::{DashboardSummary, SeriesPoint};
use adminboard::model::{Thread, User};
use adminboard::paginate::Page;
use adminboard::settings::Settings;
use chrono::{DateTime, Utc};
use console::Term;
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ID_WIDTH: usize = 4;
pub const TITLE_WIDTH: usize = 32;
pub const NAME_WIDTH: usize = 12;
pub const EMAIL_WIDTH: usize = 24;
pub const BAR_WIDTH: usize = 30;

#[derive(Serialize)]
struct Cell {
    text: String,
    style: &'static str,
}

impl Cell {
    fn new(text: impl Into<String>, style: &'static str) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Serialize)]
struct ShellData {
    brand: &'static str,
    title: &'static str,
    loading: bool,
    links: Vec<Cell>,
    status: String,
}

#[derive(Serialize)]
struct ListData {
    heading: &'static str,
    query: String,
    rows: Vec<Vec<Cell>>,
    footer: String,
}

#[derive(Serialize)]
struct FormField {
    name: String,
    value: String,
}

#[derive(Serialize)]
struct FormData {
    heading: String,
    fields: Vec<FormField>,
    error: Option<String>,
    hint: &'static str,
}

#[derive(Serialize)]
struct Stat {
    label: String,
    value: String,
}

#[derive(Serialize)]
struct Bar {
    label: String,
    bar: String,
    value: u64,
}

#[derive(Serialize)]
struct DashboardData {
    stats: Vec<Stat>,
    roles: Vec<Bar>,
    days: Vec<Bar>,
}

#[derive(Serialize)]
struct SettingsData {
    site_name: String,
    notifications: &'static str,
    notifications_style: &'static str,
    maintenance: &'static str,
    maintenance_style: &'static str,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

pub struct Renderer {
    env: Environment<'static>,
    now: DateTime<Utc>,
}

impl Renderer {
    /// Creates a renderer that colors output only when stdout supports it.
    pub fn new() -> Result<Self, Error> {
        let use_color = Term::stdout().features().colors_supported();
        Self::with_color(use_color, Utc::now())
    }

    /// Creates a renderer with explicit color control and a fixed clock for
    /// relative times.
    pub fn with_color(use_color: bool, now: DateTime<Utc>) -> Result<Self, Error> {
        let mut env = Environment::new();
        register_style_filter(&mut env, ADMIN_THEME.clone(), use_color);
        env.add_template("shell", SHELL_TEMPLATE)?;
        env.add_template("list", LIST_TEMPLATE)?;
        env.add_template("form", FORM_TEMPLATE)?;
        env.add_template("dashboard", DASHBOARD_TEMPLATE)?;
        env.add_template("settings", SETTINGS_TEMPLATE)?;
        env.add_template("messages", MESSAGES_TEMPLATE)?;
        Ok(Self { env, now })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        self.env.get_template(name)?.render(data)
    }

    pub fn render_result(&self, result: &CmdResult) -> Result<String, Error> {
        let mut sections = Vec::new();
        if let Some(shell) = &result.shell {
            sections.push(self.render("shell", &shell_data(shell))?);
        }
        if let Some(listing) = &result.listing {
            sections.push(self.render("list", &self.list_data(listing))?);
        }
        if let Some(form) = &result.form {
            sections.push(self.render("form", &form_data(form))?);
        }
        if let Some(summary) = &result.dashboard {
            sections.push(self.render("dashboard", &dashboard_data(summary))?);
        }
        if let Some(settings) = &result.settings {
            sections.push(self.render("settings", &settings_data(settings))?);
        }
        if !result.messages.is_empty() {
            sections.push(self.render("messages", &messages_data(&result.messages))?);
        }

        let mut output = sections
            .iter()
            .map(|s| s.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n");
        if !output.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }

    fn list_data(&self, listing: &Listing) -> ListData {
        match listing {
            Listing::Threads {
                search,
                filter,
                sort,
                page,
            } => ListData {
                heading: "Threads",
                query: describe_query(search, filter.as_deref(), sort),
                rows: self.thread_rows(page),
                footer: page_footer(page, "thread"),
            },
            Listing::Users {
                search,
                filter,
                sort,
                page,
            } => ListData {
                heading: "Users",
                query: describe_query(search, filter.as_deref(), sort),
                rows: self.user_rows(page),
                footer: page_footer(page, "user"),
            },
        }
    }

    fn thread_rows(&self, page: &Page<Thread>) -> Vec<Vec<Cell>> {
        let header = vec![
            Cell::new(format!("{:>ID_WIDTH$}", "#"), "label"),
            Cell::new(pad_to_width("Title", TITLE_WIDTH), "label"),
            Cell::new(pad_to_width("Device", 7), "label"),
            Cell::new(format!("{:>7}", "Replies"), "label"),
            Cell::new("Posted", "label"),
        ];
        let rows = page.items.iter().map(|t| {
            vec![
                Cell::new(format!("{:>ID_WIDTH$}", t.id), "id"),
                Cell::new(fit(&t.title, TITLE_WIDTH), "cell"),
                Cell::new(pad_to_width(&t.author_info.device, 7), "muted"),
                Cell::new(format!("{:>7}", t.reply_count), "count"),
                Cell::new(self.time_ago(t.author_info.posted_at), "time"),
            ]
        });
        std::iter::once(header).chain(rows).collect()
    }

    fn user_rows(&self, page: &Page<User>) -> Vec<Vec<Cell>> {
        let header = vec![
            Cell::new(format!("{:>ID_WIDTH$}", "#"), "label"),
            Cell::new(pad_to_width("Name", NAME_WIDTH), "label"),
            Cell::new(pad_to_width("Email", EMAIL_WIDTH), "label"),
            Cell::new(pad_to_width("Role", 9), "label"),
            Cell::new("Joined", "label"),
        ];
        let rows = page.items.iter().map(|u| {
            vec![
                Cell::new(format!("{:>ID_WIDTH$}", u.id), "id"),
                Cell::new(fit(&u.name, NAME_WIDTH), "cell"),
                Cell::new(fit(&u.email, EMAIL_WIDTH), "muted"),
                Cell::new(pad_to_width(u.role.as_str(), 9), "cell"),
                Cell::new(self.time_ago(u.joined_at), "time"),
            ]
        });
        std::iter::once(header).chain(rows).collect()
    }

    fn time_ago(&self, timestamp: DateTime<Utc>) -> String {
        let duration = self.now.signed_duration_since(timestamp);
        timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
    }
}

/// Registers the `style` filter on a minijinja environment.
fn register_style_filter(env: &mut Environment<'static>, theme: Theme, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
}

fn shell_data(shell: &ShellStatus) -> ShellData {
    let links = shell
        .links
        .iter()
        .map(|l| Cell::new(l.name, if l.active { "nav_active" } else { "nav" }))
        .collect();

    let mut flags = Vec::new();
    if shell.sidebar_open {
        flags.push("sidebar open".to_string());
    }
    if shell.collapsed {
        flags.push("sidebar collapsed".to_string());
    }
    if shell.mobile_search_open {
        flags.push("search box open".to_string());
    }
    if !shell.search_query.is_empty() {
        flags.push(format!("search box: \"{}\"", shell.search_query));
    }

    ShellData {
        brand: shell.brand,
        title: shell.title,
        loading: shell.loading,
        links,
        status: flags.join(", "),
    }
}

fn describe_query(search: &str, filter: Option<&str>, sort: &str) -> String {
    let mut parts = Vec::new();
    if !search.is_empty() {
        parts.push(format!("search: \"{}\"", search));
    }
    if let Some(f) = filter {
        parts.push(format!("filter: {}", f));
    }
    parts.push(format!("sort: {}", sort));
    parts.join("  ")
}

fn page_footer<T>(page: &Page<T>, noun: &str) -> String {
    let plural = if page.total_items == 1 { "" } else { "s" };
    format!(
        "Page {} of {} ({} {}{})",
        page.page_number, page.total_pages, page.total_items, noun, plural
    )
}

fn form_data(form: &DraftForm) -> FormData {
    let width = form
        .fields
        .iter()
        .map(|(name, _)| name.width())
        .max()
        .unwrap_or(0);
    FormData {
        heading: format!("New {}", form.noun),
        fields: form
            .fields
            .iter()
            .map(|(name, value)| FormField {
                name: pad_to_width(name, width),
                value: value.clone(),
            })
            .collect(),
        error: form.error.clone(),
        hint: "set <field> <value>, then submit or cancel",
    }
}

fn dashboard_data(summary: &DashboardSummary) -> DashboardData {
    let stats = [
        ("Threads", summary.total_threads.to_string()),
        ("Users", summary.total_users.to_string()),
        ("Replies", summary.total_replies.to_string()),
        ("Admins", summary.admins.to_string()),
        ("Moderators", summary.moderators.to_string()),
    ]
    .into_iter()
    .map(|(label, value)| Stat {
        label: pad_to_width(label, 10),
        value,
    })
    .collect();

    DashboardData {
        stats,
        roles: bars(&summary.users_by_role),
        days: bars(&summary.threads_per_day),
    }
}

fn bars(series: &[SeriesPoint]) -> Vec<Bar> {
    let max = series.iter().map(|p| p.value).max().unwrap_or(0).max(1);
    let label_width = series.iter().map(|p| p.label.width()).max().unwrap_or(0);
    series
        .iter()
        .map(|p| {
            let mut len = (p.value as usize * BAR_WIDTH) / max as usize;
            if p.value > 0 && len == 0 {
                len = 1;
            }
            Bar {
                label: pad_to_width(&p.label, label_width),
                bar: "█".repeat(len),
                value: p.value,
            }
        })
        .collect()
}

fn settings_data(settings: &Settings) -> SettingsData {
    let switch = |on: bool| if on { ("on", "on") } else { ("off", "off") };
    let (notifications, notifications_style) = switch(settings.enable_notifications);
    let (maintenance, maintenance_style) = switch(settings.maintenance_mode);
    SettingsData {
        site_name: settings.site_name.clone(),
        notifications,
        notifications_style,
        maintenance,
        maintenance_style,
    }
}

fn messages_data(messages: &[CmdMessage]) -> MessagesData {
    MessagesData {
        messages: messages
            .iter()
            .map(|m| MessageData {
                content: m.content.clone(),
                style: match m.level {
                    MessageLevel::Info => "info",
                    MessageLevel::Success => "success",
                    MessageLevel::Warning => "warning",
                    MessageLevel::Error => "error",
                },
            })
            .collect(),
    }
}

/// Truncates to `max_width` columns with an ellipsis, then pads to exactly
/// `max_width`.
fn fit(s: &str, max_width: usize) -> String {
    pad_to_width(&truncate_to_width(s, max_width), max_width)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
