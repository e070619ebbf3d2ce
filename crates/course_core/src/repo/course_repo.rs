//! Course repository contract and store-backed implementation.
//!
//! # Responsibility
//! - Expose course CRUD and paginated listings in domain shapes.
//! - Delegate every query to a `CourseStore`, converting on the way in/out.
//!
//! # Invariants
//! - The repository holds no state besides its store handle.
//! - Store failures propagate unchanged as `RepoError::Store`.
//! - `update` replaces the whole row (save), never a partial statement.

use crate::model::course::{Course, CourseId, CourseName, CoursePatch, CourseValidationError};
use crate::model::pagination::PaginationOptions;
use crate::store::{CourseNameRow, CourseRow, CourseStore, PageWindow, StoreError};
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Full-row listing issued as literal SQL. Binds `[limit, offset]`.
pub const COURSE_PAGE_RAW_SQL: &str = "SELECT * FROM course LIMIT $1 OFFSET $2";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for course persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(CourseValidationError),
    Store(StoreError),
    NotFound(CourseId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "course not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted course data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<CourseValidationError> for RepoError {
    fn from(value: CourseValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface consumed by the course service.
pub trait CourseRepository {
    /// Persists a new course and returns it with storage-generated fields.
    fn create(&self, course: &Course) -> RepoResult<Course>;
    fn find_all_with_pagination(&self, options: PaginationOptions) -> RepoResult<Vec<Course>>;
    /// Lists only course names; entries are projections, not entities.
    fn find_all_names_with_pagination(
        &self,
        options: PaginationOptions,
    ) -> RepoResult<Vec<CourseName>>;
    /// Same window as `find_all_names_with_pagination`, issued as raw SQL.
    ///
    /// Selects every column and returns full courses.
    fn find_all_names_with_pagination_raw(
        &self,
        options: PaginationOptions,
    ) -> RepoResult<Vec<Course>>;
    fn find_by_id(&self, id: CourseId) -> RepoResult<Option<Course>>;
    /// Merges `patch` onto the stored course and saves the result.
    ///
    /// An empty patch saves nothing and returns the stored course.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no course has this id.
    fn update(&self, id: CourseId, patch: CoursePatch) -> RepoResult<Course>;
    /// Deletes the course. Missing ids are not an error.
    fn remove(&self, id: CourseId) -> RepoResult<()>;
}

/// Course repository over any relational row store.
pub struct RelationalCourseRepository<S: CourseStore> {
    store: S,
}

impl<S: CourseStore> RelationalCourseRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

fn window(options: PaginationOptions) -> PageWindow {
    PageWindow {
        offset: options.offset(),
        limit: options.limit(),
    }
}

fn to_domain_all(rows: Vec<CourseRow>) -> RepoResult<Vec<Course>> {
    rows.into_iter().map(Course::try_from).collect()
}

impl<S: CourseStore> CourseRepository for RelationalCourseRepository<S> {
    fn create(&self, course: &Course) -> RepoResult<Course> {
        course.validate()?;
        let saved = self.store.save(&CourseRow::from(course))?;
        Course::try_from(saved)
    }

    fn find_all_with_pagination(&self, options: PaginationOptions) -> RepoResult<Vec<Course>> {
        let rows = self.store.find_many::<CourseRow>(window(options))?;
        to_domain_all(rows)
    }

    fn find_all_names_with_pagination(
        &self,
        options: PaginationOptions,
    ) -> RepoResult<Vec<CourseName>> {
        let rows = self.store.find_many::<CourseNameRow>(window(options))?;
        Ok(rows.into_iter().map(CourseName::from).collect())
    }

    fn find_all_names_with_pagination_raw(
        &self,
        options: PaginationOptions,
    ) -> RepoResult<Vec<Course>> {
        let offset = i64::try_from(options.offset()).unwrap_or(i64::MAX);
        let params = [
            Value::Integer(i64::from(options.limit())),
            Value::Integer(offset),
        ];
        let rows = self.store.query::<CourseRow>(COURSE_PAGE_RAW_SQL, &params)?;
        to_domain_all(rows)
    }

    fn find_by_id(&self, id: CourseId) -> RepoResult<Option<Course>> {
        self.store
            .find_one(&id)?
            .map(Course::try_from)
            .transpose()
    }

    fn update(&self, id: CourseId, patch: CoursePatch) -> RepoResult<Course> {
        let row = self.store.find_one(&id)?.ok_or(RepoError::NotFound(id))?;
        let mut course = Course::try_from(row)?;
        if patch.is_empty() {
            return Ok(course);
        }
        course.apply(patch);
        course.validate()?;

        let saved = self.store.save(&CourseRow::from(&course))?;
        Course::try_from(saved)
    }

    fn remove(&self, id: CourseId) -> RepoResult<()> {
        self.store.delete(&id)?;
        Ok(())
    }
}
