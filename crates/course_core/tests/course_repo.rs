use course_core::db::open_db_in_memory;
use course_core::{
    Course, CoursePatch, CourseRepository, PaginationOptions, RelationalCourseRepository,
    RepoError, SqliteCourseStore, StoreError,
};
use rusqlite::Connection;
use uuid::Uuid;

fn page(page: u32, limit: u32) -> PaginationOptions {
    PaginationOptions::new(page, limit).unwrap()
}

fn ids(items: &[Course]) -> Vec<Uuid> {
    items.iter().map(|course| course.id).collect()
}

fn seed(repo: &impl CourseRepository, names: &[&str]) -> Vec<Course> {
    names
        .iter()
        .map(|name| {
            repo.create(&Course::new(*name).with_description(format!("about {name}")))
                .unwrap()
        })
        .collect()
}

#[test]
fn create_then_find_by_id_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());

    let course = Course::new("Operating Systems").with_description("processes and memory");
    let created = repo.create(&course).unwrap();
    assert_eq!(created.id, course.id);
    assert!(created.is_persisted());

    let loaded = repo.find_by_id(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Operating Systems");
    assert_eq!(loaded.description.as_deref(), Some("processes and memory"));
}

#[test]
fn find_by_id_returns_none_for_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());

    assert!(repo.find_by_id(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn create_rejects_blank_name_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());

    let err = repo.create(&Course::new("   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo
        .find_all_with_pagination(page(1, 10))
        .unwrap()
        .is_empty());
}

#[test]
fn create_with_duplicate_id_upserts_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());

    let course = repo.create(&Course::new("first")).unwrap();
    let mut again = course.clone();
    again.name = "second".to_string();
    let saved = repo.create(&again).unwrap();

    assert_eq!(saved.id, course.id);
    assert_eq!(saved.created_at, course.created_at);
    assert_eq!(repo.find_all_with_pagination(page(1, 10)).unwrap().len(), 1);
}

#[test]
fn pagination_windows_follow_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let created = seed(&repo, &["A", "B", "C", "D", "E"]);

    let first = repo.find_all_with_pagination(page(1, 2)).unwrap();
    let second = repo.find_all_with_pagination(page(2, 2)).unwrap();
    let third = repo.find_all_with_pagination(page(3, 2)).unwrap();
    let beyond = repo.find_all_with_pagination(page(4, 2)).unwrap();

    assert_eq!(ids(&first), [created[0].id, created[1].id]);
    assert_eq!(ids(&second), [created[2].id, created[3].id]);
    assert_eq!(ids(&third), [created[4].id]);
    assert!(beyond.is_empty());
}

#[test]
fn name_listing_projects_only_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    seed(&repo, &["A", "B", "C"]);

    let names = repo.find_all_names_with_pagination(page(1, 2)).unwrap();
    let names: Vec<_> = names.into_iter().map(|n| n.name).collect();
    assert_eq!(names, ["A", "B"]);
}

#[test]
fn raw_name_listing_returns_full_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let created = seed(&repo, &["A", "B", "C"]);

    let rows = repo.find_all_names_with_pagination_raw(page(1, 2)).unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        let original = created.iter().find(|c| c.id == row.id).unwrap();
        assert_eq!(row, original);
        assert!(row.description.is_some());
        assert!(row.created_at.is_some());
    }

    let rest = repo.find_all_names_with_pagination_raw(page(2, 2)).unwrap();
    assert_eq!(rest.len(), 1);
    assert!(rows.iter().all(|r| r.id != rest[0].id));
}

#[test]
fn update_merges_patch_and_keeps_other_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let before = repo
        .create(&Course::new("Databases").with_description("relational model"))
        .unwrap();

    let after = repo
        .update(
            before.id,
            CoursePatch {
                name: Some("Advanced Databases".to_string()),
                description: None,
            },
        )
        .unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.name, "Advanced Databases");
    assert_eq!(after.description, before.description);
    assert_eq!(after.created_at, before.created_at);

    let reloaded = repo.find_by_id(before.id).unwrap().unwrap();
    assert_eq!(reloaded, after);
}

#[test]
fn update_missing_course_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let id = Uuid::new_v4();

    let err = repo.update(id, CoursePatch::default()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn update_advances_updated_at_within_the_same_second() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let created = repo.create(&Course::new("Databases")).unwrap();
    assert_eq!(created.created_at, created.updated_at);

    let first = repo
        .update(
            created.id,
            CoursePatch {
                name: Some("Databases I".to_string()),
                description: None,
            },
        )
        .unwrap();
    assert_eq!(first.created_at, created.created_at);
    assert!(first.updated_at > created.updated_at);

    let second = repo
        .update(
            created.id,
            CoursePatch {
                name: None,
                description: Some(Some("relational model".to_string())),
            },
        )
        .unwrap();
    assert!(second.updated_at > first.updated_at);
}

#[test]
fn empty_patch_leaves_stored_course_untouched() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let created = repo.create(&Course::new("Graphics")).unwrap();

    let unchanged = repo.update(created.id, CoursePatch::default()).unwrap();
    assert_eq!(unchanged, created);
    assert_eq!(repo.find_by_id(created.id).unwrap().unwrap(), created);

    let missing = Uuid::new_v4();
    let err = repo.update(missing, CoursePatch::default()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn update_rejects_patch_that_blanks_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let course = repo.create(&Course::new("Networks")).unwrap();

    let err = repo
        .update(
            course.id,
            CoursePatch {
                name: Some(String::new()),
                description: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(repo.find_by_id(course.id).unwrap().unwrap().name, "Networks");
}

#[test]
fn remove_deletes_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    let course = repo.create(&Course::new("Compilers")).unwrap();

    repo.remove(course.id).unwrap();
    assert!(repo.find_by_id(course.id).unwrap().is_none());

    repo.remove(course.id).unwrap();
    repo.remove(Uuid::new_v4()).unwrap();
}

#[test]
fn corrupted_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO course (id, name) VALUES ('not-a-uuid', 'Broken');",
        [],
    )
    .unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());

    let err = repo.find_all_with_pagination(page(1, 10)).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn storage_failures_propagate_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = RelationalCourseRepository::new(SqliteCourseStore::try_new(&conn).unwrap());
    conn.execute_batch("DROP TABLE course;").unwrap();

    let err = repo.create(&Course::new("Orphan")).unwrap_err();
    assert!(matches!(err, RepoError::Store(StoreError::Db(_))));
}

#[test]
fn store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteCourseStore::try_new(&conn),
        Err(StoreError::UninitializedConnection { .. })
    ));
}
