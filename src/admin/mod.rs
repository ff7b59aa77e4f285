//! Admin back-office controllers.
//!
//! One edit-state controller per managed entity (blogs, events,
//! advertisements), plus the dashboard counters and the join-form settings
//! editor. Controllers own only transient form state; every durable fact
//! lives in the record store, and every section view re-fetches on
//! activation rather than caching across sessions.

pub mod advertisements;
pub mod blogs;
pub mod dashboard;
pub mod events;
pub mod settings;

use thiserror::Error;

use crate::store::StoreError;
use self::dashboard::DashboardCounts;

/// Where an edit-state controller currently is. `Validating` and
/// `Persisting` are transient within `save`, but they are what the
/// re-entrancy guard checks: a second `save` or `delete` issued while one
/// is in flight is rejected instead of producing duplicate writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPhase {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit,
    Validating,
    Persisting,
}

/// Operator acknowledgment for irreversible actions. Without `Confirmed`,
/// a delete never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Confirmed,
    Declined,
}

fn join_fields(fields: &[&'static str]) -> String {
    fields.join(", ")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Every blank mandatory field, in form order. The check enumerates all
    /// violations in one pass so the operator sees the full list at once.
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<&'static str>),
    #[error("Image must be an http(s) URL or an uploaded data image")]
    InvalidImageReference,
    #[error("The form link must be a valid URL")]
    InvalidLink,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("The record store rejected the operation: {0}")]
    Persistence(#[from] StoreError),
    #[error("Another save or delete is still in flight")]
    Busy,
    #[error("No form is open")]
    NotOpen,
}

/// Result of the two independent re-fetches that follow a successful
/// mutation. Neither is transactional with the mutation: a failure here is
/// reported on its own and never implies the mutation failed.
#[derive(Debug)]
pub struct RefreshOutcome<T> {
    pub list: Result<Vec<T>, StoreError>,
    pub counts: Result<DashboardCounts, StoreError>,
}

impl<T> RefreshOutcome<T> {
    pub(crate) fn collect(
        list: Result<Vec<T>, StoreError>,
        counts: Result<DashboardCounts, StoreError>,
        entity: &str,
    ) -> Self {
        if let Err(e) = &list {
            log::error!("Failed to refresh {} list after mutation: {}", entity, e);
        }
        if let Err(e) = &counts {
            log::error!("Failed to refresh dashboard counts after {} mutation: {}", entity, e);
        }
        Self { list, counts }
    }
}

/// A persisted record plus the view refreshes that followed it.
#[derive(Debug)]
pub struct SaveOutcome<T> {
    pub saved: T,
    pub refresh: RefreshOutcome<T>,
}

#[derive(Debug)]
pub enum DeleteOutcome<T> {
    Deleted { refresh: RefreshOutcome<T> },
    /// The operator declined the confirmation prompt; nothing was issued.
    Declined,
}

/// Trims a free-text field into the optional column shape: blank means
/// absent.
pub(crate) fn opt_trimmed(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
