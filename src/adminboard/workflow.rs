//! # Add-Record Workflow
//!
//! The modal "Add" flow as a small state machine:
//!
//! ```text
//!  Closed ──open()──▶ Editing ──submit() ok──▶ Closed (committed)
//!    ▲                 │  ▲
//!    │                 │  └── submit() failed: stays Editing, error kept
//!    └────cancel()─────┘
//! ```
//!
//! `edit()` never validates. `submit()` checks required fields (non-empty after
//! trimming) in field order, then formats, and reports only the first failure.
//! A successful submit inserts through the [`DataStore`] and resets the list
//! view to page 1 within the same call.

use crate::error::{AdminError, Result, ValidationError};
use crate::model::{is_valid_email, AuthorInfo, Record, Role, Thread, User, DEVICES};
use crate::store::DataStore;
use crate::view::ListView;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

pub trait Draft: Sized {
    type Output: Record;

    /// Field names accepted by [`Draft::set_field`], in validation order.
    const FIELDS: &'static [&'static str];

    fn defaults(now: DateTime<Utc>) -> Self;

    fn set_field(&mut self, field: &str, value: &str) -> std::result::Result<(), ValidationError>;

    fn validate(&self) -> std::result::Result<(), ValidationError>;

    fn into_record(self) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadDraft {
    pub title: String,
    pub content: String,
    pub device: String,
    pub posted_at: DateTime<Utc>,
}

impl Draft for ThreadDraft {
    type Output = Thread;

    const FIELDS: &'static [&'static str] = &["title", "content", "device"];

    fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            device: DEVICES[0].to_string(),
            posted_at: now,
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> std::result::Result<(), ValidationError> {
        match field {
            "title" => self.title = value.to_string(),
            "content" => self.content = value.to_string(),
            "device" => self.device = value.to_string(),
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        required(&self.title, "Title")?;
        required(&self.content, "Content")?;
        required(&self.device, "Device")
    }

    fn into_record(self) -> Thread {
        Thread::new(
            self.title.trim(),
            self.content.trim(),
            AuthorInfo {
                posted_at: self.posted_at,
                device: self.device.trim().to_string(),
                ip: "127.0.0.1".to_string(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl Draft for UserDraft {
    type Output = User;

    const FIELDS: &'static [&'static str] = &["name", "email", "role", "joined"];

    fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: Role::ALL[0],
            joined_at: now,
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> std::result::Result<(), ValidationError> {
        match field {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "role" => self.role = value.parse()?,
            "joined" => self.joined_at = parse_date(value)?,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn validate(&self) -> std::result::Result<(), ValidationError> {
        required(&self.name, "Name")?;
        required(&self.email, "Email")?;
        if !is_valid_email(self.email.trim()) {
            return Err(ValidationError::InvalidFormat {
                field: "Email",
                expected: "email address",
            });
        }
        Ok(())
    }

    fn into_record(self) -> User {
        User::new(self.name.trim(), self.email.trim(), self.role, self.joined_at)
    }
}

fn required(value: &str, field: &'static str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

fn parse_date(value: &str) -> std::result::Result<DateTime<Utc>, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "Joined",
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState<D> {
    Closed,
    Editing {
        draft: D,
        error: Option<ValidationError>,
    },
}

#[derive(Debug, Clone)]
pub struct AddRecordFlow<D> {
    state: FlowState<D>,
}

impl<D> Default for AddRecordFlow<D> {
    fn default() -> Self {
        Self {
            state: FlowState::Closed,
        }
    }
}

impl<D: Draft> AddRecordFlow<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState<D> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FlowState::Editing { .. })
    }

    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            FlowState::Editing { draft, .. } => Some(draft),
            FlowState::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match &self.state {
            FlowState::Editing { error, .. } => error.as_ref(),
            FlowState::Closed => None,
        }
    }

    /// Opens the modal with a fresh draft. Re-opening keeps the current draft.
    pub fn open(&mut self, now: DateTime<Utc>) {
        if self.is_open() {
            return;
        }
        debug!("add flow opened");
        self.state = FlowState::Editing {
            draft: D::defaults(now),
            error: None,
        };
    }

    pub fn edit(&mut self, field: &str, value: &str) -> Result<()> {
        match &mut self.state {
            FlowState::Editing { draft, .. } => Ok(draft.set_field(field, value)?),
            FlowState::Closed => Err(AdminError::Api("Nothing is being added".into())),
        }
    }

    /// Validates and commits the draft.
    ///
    /// On success the record is stored, the flow closes and `view` goes back to
    /// page 1. On failure the flow stays open with the first failing rule kept
    /// as its error.
    pub fn submit<S>(
        &mut self,
        store: &mut S,
        view: &mut ListView<<D::Output as Record>::Sort>,
    ) -> Result<D::Output>
    where
        S: DataStore<D::Output>,
    {
        let draft = match std::mem::replace(&mut self.state, FlowState::Closed) {
            FlowState::Editing { draft, .. } => draft,
            FlowState::Closed => return Err(AdminError::Api("Nothing is being added".into())),
        };

        if let Err(e) = draft.validate() {
            debug!(error = %e, "draft rejected");
            self.state = FlowState::Editing {
                draft,
                error: Some(e.clone()),
            };
            return Err(e.into());
        }

        let stored = store.insert(draft.into_record()).clone();
        view.invalidate();
        info!(id = stored.id(), "record added");
        Ok(stored)
    }

    pub fn cancel(&mut self) {
        if self.is_open() {
            debug!("add flow cancelled");
        }
        self.state = FlowState::Closed;
    }
}
