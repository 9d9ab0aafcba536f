//! Output templates, kept as standalone files and embedded at compile time.
//!
//! Templates are minijinja. Line breaks are explicit: each template ends its
//! own lines, and `render.rs` joins sections with a blank line. Layout math
//! (widths, truncation, bar lengths) happens in Rust; templates only pick
//! styles by semantic name.

pub const SHELL_TEMPLATE: &str = include_str!("templates/shell.tmp");
pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const FORM_TEMPLATE: &str = include_str!("templates/form.tmp");
pub const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.tmp");
pub const SETTINGS_TEMPLATE: &str = include_str!("templates/settings.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
