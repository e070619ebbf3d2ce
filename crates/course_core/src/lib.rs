//! Course storage core: domain model, row stores and the course repository.
//! Business invariants for courses live in this crate.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{Course, CourseId, CourseName, CoursePatch, CourseValidationError};
pub use model::pagination::{PaginationError, PaginationOptions};
pub use repo::course_repo::{
    CourseRepository, RelationalCourseRepository, RepoError, RepoResult, COURSE_PAGE_RAW_SQL,
};
pub use service::course_service::{
    CourseService, CourseServiceError, CourseServiceResult, CoursesPage,
};
pub use store::{
    CourseNameRow, CourseRow, CourseStore, MemoryCourseStore, PageWindow, SqliteCourseStore,
    StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
