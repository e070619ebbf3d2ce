//! Domain model for course storage.
//!
//! # Responsibility
//! - Define the domain shapes used by business logic, independent of rows.
//! - Define pagination input shared by every listing.
//!
//! # Invariants
//! - Every course is identified by a stable `CourseId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod course;
pub mod pagination;
