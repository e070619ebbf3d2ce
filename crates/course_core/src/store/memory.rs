//! In-memory course row store.
//!
//! Mirrors the SQLite store semantics closely enough for repository and
//! service tests: insertion order, upsert timestamps, idempotent delete.
//! Raw SQL is not interpreted.

use super::{CourseRow, CourseStore, FromRow, PageWindow, StoreError, StoreResult};
use crate::model::course::CourseId;
use rusqlite::types::Value;
use std::cell::{Cell, RefCell};
use std::time::{SystemTime, UNIX_EPOCH};

/// Vector-backed row store, single-threaded.
#[derive(Debug, Default)]
pub struct MemoryCourseStore {
    rows: RefCell<Vec<CourseRow>>,
    clock: Cell<i64>,
}

impl MemoryCourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    // Wall-clock milliseconds, forced strictly increasing so ordering by
    // timestamp stays deterministic within one store.
    fn tick(&self) -> i64 {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as i64);
        let next = wall.max(self.clock.get() + 1);
        self.clock.set(next);
        next
    }
}

impl CourseStore for MemoryCourseStore {
    fn save(&self, row: &CourseRow) -> StoreResult<CourseRow> {
        let now = self.tick();
        let mut rows = self.rows.borrow_mut();

        if let Some(existing) = rows.iter_mut().find(|stored| stored.id == row.id) {
            existing.name = row.name.clone();
            existing.description = row.description.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let inserted = CourseRow {
            created_at: now,
            updated_at: now,
            ..row.clone()
        };
        rows.push(inserted.clone());
        Ok(inserted)
    }

    fn find_one(&self, id: &CourseId) -> StoreResult<Option<CourseRow>> {
        let key = id.to_string();
        Ok(self
            .rows
            .borrow()
            .iter()
            .find(|stored| stored.id == key)
            .cloned())
    }

    fn find_many<T: FromRow>(&self, window: PageWindow) -> StoreResult<Vec<T>> {
        let skip = usize::try_from(window.offset).unwrap_or(usize::MAX);
        Ok(self
            .rows
            .borrow()
            .iter()
            .skip(skip)
            .take(window.limit as usize)
            .map(T::from_course_row)
            .collect())
    }

    fn query<T: FromRow>(&self, _sql: &str, _params: &[Value]) -> StoreResult<Vec<T>> {
        Err(StoreError::Unsupported("raw sql query"))
    }

    fn delete(&self, id: &CourseId) -> StoreResult<usize> {
        let key = id.to_string();
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|stored| stored.id != key);
        Ok(before - rows.len())
    }
}
