//! # Storage Layer
//!
//! The [`DataStore`] trait is the only way records enter or leave the system.
//! Everything downstream (query engine, paginator, renderers) only borrows.
//!
//! ## Ordering and Ids
//!
//! - Inserts **prepend**: the newest record is always at index 0.
//! - Ids are assigned by the store as `max(existing ids) + 1` and are never
//!   reissued, even after the record holding the highest id is removed.
//! - `update` and `remove` never reorder the records they don't touch.
//!
//! ## No Validation
//!
//! Stores trust their callers. Drafts and patches are validated in the
//! workflow and command layers before they get here.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the only backend; all state is process-local.

use crate::error::Result;
use crate::model::Record;

pub mod memory;

pub trait DataStore<R: Record> {
    /// Assign the next id, prepend, and return the stored record.
    fn insert(&mut self, record: R) -> &R;

    /// All records, newest insert first. No side effects.
    fn all(&self) -> &[R];

    fn get(&self, id: u64) -> Option<&R>;

    /// Apply a patch in place, keeping position and id.
    fn update(&mut self, id: u64, patch: R::Patch) -> Result<&R>;

    /// Remove a record, leaving the relative order of the rest intact.
    fn remove(&mut self, id: u64) -> Result<R>;

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}
