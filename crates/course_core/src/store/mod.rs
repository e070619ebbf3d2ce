//! Row-level storage capability bound to the `course` table.
//!
//! # Responsibility
//! - Define the storage shapes (`CourseRow`, `CourseNameRow`).
//! - Define the `CourseStore` contract the course repository delegates to.
//! - Provide SQLite and in-memory implementations.
//!
//! # Invariants
//! - Stores never inspect domain rules; they persist and return rows.
//! - `find_many` returns rows in insertion order.
//! - Deleting a missing id affects zero rows and is not an error.

use crate::db::DbError;
use crate::model::course::CourseId;
use rusqlite::types::Value;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCourseStore;
pub use sqlite::SqliteCourseStore;

/// Name of the table holding course rows.
pub const COURSE_TABLE: &str = "course";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised by a row store.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Connection schema is older than the migrations this binary ships.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// The store cannot serve this kind of request.
    Unsupported(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}; open it with open_db first"
            ),
            Self::Unsupported(what) => write!(f, "operation not supported by this store: {what}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A row shape that can be read from the `course` table.
///
/// `COLUMNS` doubles as the projection: stores fetch exactly these columns.
pub trait FromRow: Sized {
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Builds the shape from a full row, used by stores that do not speak SQL.
    fn from_course_row(row: &CourseRow) -> Self;
}

/// Storage representation of a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    /// Hyphenated UUID text.
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Epoch milliseconds. Ignored on save; storage assigns it.
    pub created_at: i64,
    /// Epoch milliseconds. Ignored on save; storage assigns it.
    pub updated_at: i64,
}

impl FromRow for CourseRow {
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "created_at", "updated_at"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn from_course_row(row: &CourseRow) -> Self {
        row.clone()
    }
}

/// `name`-only projection of a course row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseNameRow {
    pub name: String,
}

impl FromRow for CourseNameRow {
    const COLUMNS: &'static [&'static str] = &["name"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get("name")?,
        })
    }

    fn from_course_row(row: &CourseRow) -> Self {
        Self {
            name: row.name.clone(),
        }
    }
}

/// Zero-based `(offset, limit)` slice of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u32,
}

/// Generic repository capability over `course` rows.
pub trait CourseStore {
    /// Inserts the row, or replaces the caller-owned columns of an existing
    /// row with the same id. Returns the row as persisted.
    fn save(&self, row: &CourseRow) -> StoreResult<CourseRow>;

    fn find_one(&self, id: &CourseId) -> StoreResult<Option<CourseRow>>;

    /// Reads one window of rows, projected to `T::COLUMNS`.
    fn find_many<T: FromRow>(&self, window: PageWindow) -> StoreResult<Vec<T>>;

    /// Runs a raw parameterized query. Parameters bind positionally.
    fn query<T: FromRow>(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<T>>;

    /// Deletes by id and returns the number of affected rows.
    fn delete(&self, id: &CourseId) -> StoreResult<usize>;
}

impl<S: CourseStore> CourseStore for &S {
    fn save(&self, row: &CourseRow) -> StoreResult<CourseRow> {
        (**self).save(row)
    }

    fn find_one(&self, id: &CourseId) -> StoreResult<Option<CourseRow>> {
        (**self).find_one(id)
    }

    fn find_many<T: FromRow>(&self, window: PageWindow) -> StoreResult<Vec<T>> {
        (**self).find_many(window)
    }

    fn query<T: FromRow>(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<T>> {
        (**self).query(sql, params)
    }

    fn delete(&self, id: &CourseId) -> StoreResult<usize> {
        (**self).delete(id)
    }
}
