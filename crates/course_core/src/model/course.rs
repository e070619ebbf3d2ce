//! Course domain model.
//!
//! # Responsibility
//! - Define the canonical course record used by business logic.
//! - Define the name-only projection and the partial update payload.
//!
//! # Invariants
//! - `id` is stable, non-nil and never reused for another course.
//! - `name` is never blank for a valid course.
//! - `created_at`/`updated_at` are owned by storage and stay `None` until
//!   the course has been persisted.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a course.
pub type CourseId = Uuid;

/// Domain-level validation failures for course records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseValidationError {
    /// The nil UUID is reserved and cannot identify a course.
    NilId,
    /// `name` is empty or whitespace only.
    EmptyName,
}

impl Display for CourseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "course id must not be the nil uuid"),
            Self::EmptyName => write!(f, "course name must not be blank"),
        }
    }
}

impl Error for CourseValidationError {}

/// Canonical domain record for a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    /// Free-form text, copied through without inspection.
    #[serde(default)]
    pub description: Option<String>,
    /// Epoch milliseconds, set by storage on first save.
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Epoch milliseconds, refreshed by storage on every save.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl Course {
    /// Creates a new, not yet persisted course with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Creates a new course with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: CourseId, name: impl Into<String>) -> Result<Self, CourseValidationError> {
        let course = Self {
            id,
            ..Self::new(name)
        };
        course.validate()?;
        Ok(course)
    }

    /// Builder-style setter for `description`.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Checks domain invariants before the record reaches storage.
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        if self.id.is_nil() {
            return Err(CourseValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(CourseValidationError::EmptyName);
        }
        Ok(())
    }

    /// Returns whether storage has already assigned timestamps.
    pub fn is_persisted(&self) -> bool {
        self.created_at.is_some()
    }

    /// Applies a partial payload with shallow field overwrite.
    ///
    /// Identity and storage-owned timestamps are never touched.
    pub fn apply(&mut self, patch: CoursePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Name-only projection of a course.
///
/// Returned by listings that fetch the `name` column alone; it is not a
/// full entity and carries no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseName {
    pub name: String,
}

/// Partial update payload.
///
/// `None` keeps the current value. For `description`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoursePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl CoursePatch {
    /// Returns whether this payload changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

// Distinguishes an absent `description` key from an explicit `null`.
// `None` is skipped on the way out, so `serialize` only sees `Some`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<Option<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}
