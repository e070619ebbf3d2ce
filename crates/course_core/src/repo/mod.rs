//! Repository layer: domain-facing course persistence.
//!
//! # Responsibility
//! - Define the use-case oriented course data access contract.
//! - Convert between domain shapes and row shapes around store calls.
//!
//! # Invariants
//! - Writes call `Course::validate()` before reaching the store.
//! - Read-side absence is `None`; update-side absence is `RepoError::NotFound`.

pub mod course_mapper;
pub mod course_repo;
