//! # Domain Model
//!
//! Threads and users share one generic [`Record`] shape: an immutable integer id
//! assigned by the store, a handful of string fields and a creation timestamp.
//! Each record type describes itself to the query engine through the trait:
//!
//! - which text fields free-text search looks at
//! - which field the exact-match filter compares against
//! - which sort keys it supports ([`SortKey`])
//! - what a partial update looks like ([`Patch`])
//!
//! The query engine, paginator and store are all written against the trait, so
//! the Threads and Users views run the exact same list logic.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Pattern an email-shaped field must match: something, an `@`, something,
/// a dot, something, with no whitespace anywhere.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub trait Record: Clone {
    type Sort: SortKey<Self>;
    type Patch: Patch;

    fn id(&self) -> u64;

    /// Only the store calls this, exactly once, when the record is inserted.
    fn assign_id(&mut self, id: u64);

    fn created_at(&self) -> DateTime<Utc>;

    /// Text fields consulted by free-text search.
    fn search_fields(&self) -> Vec<&str>;

    /// The field the exact-match filter compares against.
    fn filter_field(&self) -> &str;

    /// Applies a partial update. Never changes the id.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// A comparator selected from an enumerated set of orderings.
pub trait SortKey<R>:
    Copy + Default + fmt::Debug + fmt::Display + FromStr<Err = ValidationError>
{
    fn compare(&self, a: &R, b: &R) -> Ordering;
}

/// A partial update, built one field at a time from user input.
pub trait Patch: Default {
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), ValidationError>;

    fn validate(&self) -> Result<(), ValidationError>;

    fn is_empty(&self) -> bool;
}

// --- Threads ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub posted_at: DateTime<Utc>,
    pub device: String,
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author_info: AuthorInfo,
    pub reply_count: u32,
}

impl Thread {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author_info: AuthorInfo) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            author_info,
            reply_count: 0,
        }
    }

    pub fn with_replies(mut self, reply_count: u32) -> Self {
        self.reply_count = reply_count;
        self
    }
}

impl Record for Thread {
    type Sort = ThreadSort;
    type Patch = ThreadPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.author_info.posted_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }

    fn filter_field(&self) -> &str {
        &self.author_info.device
    }

    fn apply_patch(&mut self, patch: ThreadPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(device) = patch.device {
            self.author_info.device = device;
        }
    }
}

pub const DEVICES: [&str; 3] = ["Desktop", "Mobile", "Tablet"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadSort {
    #[default]
    Newest,
    Oldest,
    MostReplies,
    FewestReplies,
}

impl SortKey<Thread> for ThreadSort {
    fn compare(&self, a: &Thread, b: &Thread) -> Ordering {
        match self {
            ThreadSort::Newest => b.created_at().cmp(&a.created_at()),
            ThreadSort::Oldest => a.created_at().cmp(&b.created_at()),
            ThreadSort::MostReplies => b.reply_count.cmp(&a.reply_count),
            ThreadSort::FewestReplies => a.reply_count.cmp(&b.reply_count),
        }
    }
}

impl fmt::Display for ThreadSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThreadSort::Newest => "newest",
            ThreadSort::Oldest => "oldest",
            ThreadSort::MostReplies => "most-replies",
            ThreadSort::FewestReplies => "fewest-replies",
        };
        f.write_str(name)
    }
}

impl FromStr for ThreadSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(ThreadSort::Newest),
            "oldest" => Ok(ThreadSort::Oldest),
            "most-replies" | "replies" => Ok(ThreadSort::MostReplies),
            "fewest-replies" => Ok(ThreadSort::FewestReplies),
            _ => Err(ValidationError::InvalidValue {
                field: "sort",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub device: Option<String>,
}

impl Patch for ThreadPatch {
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        match field {
            "title" => self.title = Some(value.trim().to_string()),
            "content" => self.content = Some(value.trim().to_string()),
            "device" => self.device = Some(value.trim().to_string()),
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set(self.title.as_deref(), "Title")?;
        require_if_set(self.content.as_deref(), "Content")?;
        require_if_set(self.device.as_deref(), "Device")
    }

    fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.device.is_none()
    }
}

// --- Users ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Moderator, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Moderator => "Moderator",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "Role",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            role,
            joined_at,
        }
    }
}

impl Record for User {
    type Sort = UserSort;
    type Patch = UserPatch;

    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.role.as_str()]
    }

    fn filter_field(&self) -> &str {
        self.role.as_str()
    }

    fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserSort {
    #[default]
    Newest,
    Oldest,
    Name,
    Id,
}

impl SortKey<User> for UserSort {
    fn compare(&self, a: &User, b: &User) -> Ordering {
        match self {
            UserSort::Newest => b.joined_at.cmp(&a.joined_at),
            UserSort::Oldest => a.joined_at.cmp(&b.joined_at),
            UserSort::Name => a.name.cmp(&b.name),
            UserSort::Id => a.id.cmp(&b.id),
        }
    }
}

impl fmt::Display for UserSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserSort::Newest => "newest",
            UserSort::Oldest => "oldest",
            UserSort::Name => "name",
            UserSort::Id => "id",
        };
        f.write_str(name)
    }
}

impl FromStr for UserSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(UserSort::Newest),
            "oldest" => Ok(UserSort::Oldest),
            "name" => Ok(UserSort::Name),
            "id" => Ok(UserSort::Id),
            _ => Err(ValidationError::InvalidValue {
                field: "sort",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl Patch for UserPatch {
    fn set_field(&mut self, field: &str, value: &str) -> Result<(), ValidationError> {
        match field {
            "name" => self.name = Some(value.trim().to_string()),
            "email" => self.email = Some(value.trim().to_string()),
            "role" => self.role = Some(value.parse()?),
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_if_set(self.name.as_deref(), "Name")?;
        require_if_set(self.email.as_deref(), "Email")?;
        match self.email.as_deref() {
            Some(email) if !is_valid_email(email) => Err(ValidationError::InvalidFormat {
                field: "Email",
                expected: "email address",
            }),
            _ => Ok(()),
        }
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

fn require_if_set(value: Option<&str>, field: &'static str) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.trim().is_empty() => Err(ValidationError::Required { field }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap()
    }

    fn thread(title: &str, hour: u32, replies: u32) -> Thread {
        Thread::new(
            title,
            "body",
            AuthorInfo {
                posted_at: at(hour),
                device: "Desktop".into(),
                ip: "10.0.0.1".into(),
            },
        )
        .with_replies(replies)
    }

    #[test]
    fn email_pattern_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("user12@example.co.uk"));
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn thread_sort_keys_order_by_time_and_replies() {
        let early = thread("early", 1, 10);
        let late = thread("late", 5, 2);

        assert_eq!(ThreadSort::Newest.compare(&late, &early), Ordering::Less);
        assert_eq!(ThreadSort::Oldest.compare(&early, &late), Ordering::Less);
        assert_eq!(ThreadSort::MostReplies.compare(&early, &late), Ordering::Less);
        assert_eq!(ThreadSort::FewestReplies.compare(&late, &early), Ordering::Less);
    }

    #[test]
    fn sort_keys_round_trip_through_display() {
        for key in [
            ThreadSort::Newest,
            ThreadSort::Oldest,
            ThreadSort::MostReplies,
            ThreadSort::FewestReplies,
        ] {
            assert_eq!(key.to_string().parse::<ThreadSort>().unwrap(), key);
        }
        assert_eq!("NAME".parse::<UserSort>().unwrap(), UserSort::Name);
        assert!("loudest".parse::<UserSort>().is_err());
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("moderator".parse::<Role>().unwrap(), Role::Moderator);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!(matches!(
            "root".parse::<Role>(),
            Err(ValidationError::InvalidValue { field: "Role", .. })
        ));
    }

    #[test]
    fn user_patch_rejects_blank_and_malformed_values() {
        let mut patch = UserPatch::default();
        patch.set_field("name", "   ").unwrap();
        assert_eq!(
            patch.validate(),
            Err(ValidationError::Required { field: "Name" })
        );

        let mut patch = UserPatch::default();
        patch.set_field("email", "nope").unwrap();
        assert!(matches!(
            patch.validate(),
            Err(ValidationError::InvalidFormat { field: "Email", .. })
        ));
    }

    #[test]
    fn patch_never_touches_the_id() {
        let mut t = thread("old", 1, 0);
        t.assign_id(7);
        let mut patch = ThreadPatch::default();
        patch.set_field("title", "new").unwrap();
        t.apply_patch(patch);

        assert_eq!(t.id(), 7);
        assert_eq!(t.title, "new");
    }

    #[test]
    fn unknown_patch_field_is_reported() {
        let mut patch = ThreadPatch::default();
        assert_eq!(
            patch.set_field("colour", "red"),
            Err(ValidationError::UnknownField("colour".into()))
        );
        assert!(patch.is_empty());
    }
}
