//! SQLite-backed course row store.
//!
//! # Invariants
//! - Only connections migrated to `latest_version()` are accepted.
//! - Windowed reads order by `rowid`, so pages follow insertion order.
//! - Timestamps are epoch milliseconds.
//! - Upserts keep `created_at` and move `updated_at` strictly forward.

use super::{CourseRow, CourseStore, FromRow, PageWindow, StoreError, StoreResult, COURSE_TABLE};
use crate::db::migrations::{current_version, latest_version};
use crate::model::course::CourseId;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

const NOW_MS_SQL: &str = "CAST((julianday('now') - 2440587.5) * 86400000 AS INTEGER)";

/// Row store over a borrowed, migrated SQLite connection.
pub struct SqliteCourseStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCourseStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `StoreError::UninitializedConnection` when migrations are missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version < expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    fn collect_rows<T: FromRow>(&self, sql: &str, values: Vec<Value>) -> StoreResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(values))?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(T::from_row(row)?);
        }
        Ok(items)
    }
}

impl CourseStore for SqliteCourseStore<'_> {
    fn save(&self, row: &CourseRow) -> StoreResult<CourseRow> {
        // Bumped past the stored value so same-millisecond saves still advance.
        let sql = format!(
            "INSERT INTO {COURSE_TABLE} (id, name, description)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                updated_at = MAX({NOW_MS_SQL}, {COURSE_TABLE}.updated_at + 1)
             RETURNING {};",
            CourseRow::COLUMNS.join(", ")
        );
        let saved = self.conn.query_row(
            &sql,
            params![row.id.as_str(), row.name.as_str(), row.description.as_deref()],
            CourseRow::from_row,
        )?;
        Ok(saved)
    }

    fn find_one(&self, id: &CourseId) -> StoreResult<Option<CourseRow>> {
        let sql = format!(
            "SELECT {} FROM {COURSE_TABLE} WHERE id = ?1;",
            CourseRow::COLUMNS.join(", ")
        );
        let mut rows = self.collect_rows::<CourseRow>(&sql, vec![Value::Text(id.to_string())])?;
        Ok(rows.pop())
    }

    fn find_many<T: FromRow>(&self, window: PageWindow) -> StoreResult<Vec<T>> {
        let sql = format!(
            "SELECT {} FROM {COURSE_TABLE} ORDER BY rowid ASC LIMIT ?1 OFFSET ?2;",
            T::COLUMNS.join(", ")
        );
        // An offset past i64::MAX is past any real table end.
        let offset = i64::try_from(window.offset).unwrap_or(i64::MAX);
        self.collect_rows(
            &sql,
            vec![
                Value::Integer(i64::from(window.limit)),
                Value::Integer(offset),
            ],
        )
    }

    fn query<T: FromRow>(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<T>> {
        self.collect_rows(sql, params.to_vec())
    }

    fn delete(&self, id: &CourseId) -> StoreResult<usize> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {COURSE_TABLE} WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteCourseStore;
    use crate::db::open_db_in_memory;
    use crate::store::{CourseNameRow, CourseRow, CourseStore, PageWindow, StoreError};
    use rusqlite::Connection;
    use uuid::Uuid;

    fn row(name: &str) -> CourseRow {
        CourseRow {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn save_assigns_timestamps_and_upserts() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteCourseStore::try_new(&conn).unwrap();

        let inserted = store.save(&row("Physics")).unwrap();
        assert!(inserted.created_at > 0);
        assert!(inserted.updated_at >= inserted.created_at);

        let mut changed = inserted.clone();
        changed.name = "Chemistry".to_string();
        changed.created_at = 1;
        let updated = store.save(&changed).unwrap();
        assert_eq!(updated.id, inserted.id);
        assert_eq!(updated.name, "Chemistry");
        assert_eq!(updated.created_at, inserted.created_at);
        assert!(updated.updated_at > inserted.updated_at);

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM course;", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn timestamps_carry_millisecond_precision() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteCourseStore::try_new(&conn).unwrap();

        // Whole-second clocks always land on a multiple of 1000.
        let all_whole_seconds = (0..20).all(|index| {
            let saved = store.save(&row(&format!("c{index}"))).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(1));
            saved.created_at % 1000 == 0
        });
        assert!(!all_whole_seconds);
    }

    #[test]
    fn find_many_projects_requested_columns_in_insertion_order() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteCourseStore::try_new(&conn).unwrap();
        for name in ["C", "A", "B"] {
            store.save(&row(name)).unwrap();
        }

        let names: Vec<CourseNameRow> = store
            .find_many(PageWindow {
                offset: 1,
                limit: 5,
            })
            .unwrap();
        let names: Vec<_> = names.into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn delete_reports_affected_rows() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteCourseStore::try_new(&conn).unwrap();
        let saved = store.save(&row("Biology")).unwrap();
        let id = Uuid::parse_str(&saved.id).unwrap();

        assert_eq!(store.delete(&id).unwrap(), 1);
        assert_eq!(store.delete(&id).unwrap(), 0);
    }

    #[test]
    fn try_new_rejects_unmigrated_connection() {
        let conn = Connection::open_in_memory().unwrap();
        match SqliteCourseStore::try_new(&conn) {
            Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version: 0,
            }) => assert!(expected_version > 0),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected uninitialized connection error"),
        }
    }
}
