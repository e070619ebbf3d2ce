//! Course use-case service.
//!
//! # Responsibility
//! - Provide create/get/list/update/remove entry points for callers.
//! - Normalize page sizes and shape list results for infinite scrolling.
//!
//! # Invariants
//! - Page size defaults to 10 and is clamped to 50.
//! - `has_next_page` is true exactly when a page came back full.
//! - Mutation logs carry ids and counts only, never course text.

use crate::model::course::{Course, CourseId, CourseName, CoursePatch};
use crate::model::pagination::{PaginationError, PaginationOptions};
use crate::repo::course_repo::{CourseRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const COURSES_DEFAULT_LIMIT: u32 = 10;
pub const COURSES_LIMIT_MAX: u32 = 50;

/// Service error for course use-cases.
#[derive(Debug)]
pub enum CourseServiceError {
    InvalidPagination(PaginationError),
    CourseNotFound(CourseId),
    Repo(RepoError),
}

impl Display for CourseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPagination(err) => write!(f, "invalid pagination: {err}"),
            Self::CourseNotFound(id) => write!(f, "course not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CourseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPagination(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::CourseNotFound(_) => None,
        }
    }
}

impl From<RepoError> for CourseServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::CourseNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<PaginationError> for CourseServiceError {
    fn from(value: PaginationError) -> Self {
        Self::InvalidPagination(value)
    }
}

pub type CourseServiceResult<T> = Result<T, CourseServiceError>;

/// One page of courses plus a continuation hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursesPage {
    pub items: Vec<Course>,
    pub has_next_page: bool,
    /// Effective page size after defaulting and clamping.
    pub applied_limit: u32,
}

/// Resolves caller page-size input to the effective limit.
pub fn normalize_course_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => COURSES_DEFAULT_LIMIT,
        Some(value) => value.min(COURSES_LIMIT_MAX),
    }
}

/// Course service facade over repository implementations.
pub struct CourseService<R: CourseRepository> {
    repo: R,
}

impl<R: CourseRepository> CourseService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_course(
        &self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> CourseServiceResult<Course> {
        let mut course = Course::new(name);
        course.description = description;

        let created = self.repo.create(&course)?;
        info!(
            "event=course_create module=service status=ok course_id={}",
            created.id
        );
        Ok(created)
    }

    pub fn get_course(&self, id: CourseId) -> CourseServiceResult<Course> {
        self.repo
            .find_by_id(id)?
            .ok_or(CourseServiceError::CourseNotFound(id))
    }

    pub fn list_courses(&self, page: u32, limit: Option<u32>) -> CourseServiceResult<CoursesPage> {
        let applied_limit = normalize_course_limit(limit);
        let options = PaginationOptions::new(page, applied_limit)?;
        let items = self.repo.find_all_with_pagination(options)?;

        Ok(CoursesPage {
            has_next_page: items.len() == applied_limit as usize,
            items,
            applied_limit,
        })
    }

    pub fn list_course_names(
        &self,
        page: u32,
        limit: Option<u32>,
    ) -> CourseServiceResult<Vec<CourseName>> {
        let options = PaginationOptions::new(page, normalize_course_limit(limit))?;
        Ok(self.repo.find_all_names_with_pagination(options)?)
    }

    pub fn update_course(&self, id: CourseId, patch: CoursePatch) -> CourseServiceResult<Course> {
        match self.repo.update(id, patch) {
            Ok(course) => {
                info!("event=course_update module=service status=ok course_id={id}");
                Ok(course)
            }
            Err(RepoError::NotFound(_)) => {
                warn!("event=course_update module=service status=not_found course_id={id}");
                Err(CourseServiceError::CourseNotFound(id))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn remove_course(&self, id: CourseId) -> CourseServiceResult<()> {
        self.repo.remove(id)?;
        info!("event=course_remove module=service status=ok course_id={id}");
        Ok(())
    }
}
