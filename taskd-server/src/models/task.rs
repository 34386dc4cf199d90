//! Task record, creation and partial-update shapes

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Patch, ValidationError};

/// Maximum length for task titles (matches the VARCHAR(255) column)
const MAX_TITLE_LEN: usize = 255;

/// Task lifecycle status.
///
/// Stored as the `task_status` Postgres enum; only these three values are
/// ever persisted or returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Validated task title (trimmed, 1-255 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Create a task title, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - Not empty after trimming
    /// - At most 255 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Task record as stored (and as returned on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Task {
    pub task_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated creation payload.
///
/// `task_id` and both timestamps are assigned by the datastore.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

/// Validated partial-update payload.
///
/// Each field is a [`Patch`]: only supplied fields participate in the
/// update statement. `title` and `status` are not nullable, so an explicit
/// null for either is rejected before this type is constructed.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Patch<TaskTitle>,
    pub description: Patch<String>,
    pub status: Patch<TaskStatus>,
    pub due_date: Patch<NaiveDate>,
}

impl TaskPatch {
    /// True when no field was supplied; the update is a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_absent()
            && self.description.is_absent()
            && self.status.is_absent()
            && self.due_date.is_absent()
    }
}
