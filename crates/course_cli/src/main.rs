//! CLI smoke entry point.
//!
//! Opens a course database (in-memory when no path is given), seeds one
//! course into an empty table and prints the first page. Set
//! `COURSE_LOG_DIR` to an absolute path to write rolling logs there.

use course_core::db::{open_db, open_db_in_memory};
use course_core::{CourseService, RelationalCourseRepository, SqliteCourseStore};
use std::error::Error;
use std::process::ExitCode;

const SAMPLE_COURSE_NAME: &str = "Introduction to Rust";
const LOG_DIR_ENV: &str = "COURSE_LOG_DIR";

fn main() -> ExitCode {
    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("course_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>) -> Result<(), Box<dyn Error>> {
    println!("course_core version={}", course_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        course_core::init_logging(course_core::default_log_level(), &log_dir)?;
    }

    let conn = match db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteCourseStore::try_new(&conn)?;
    let service = CourseService::new(RelationalCourseRepository::new(store));

    let first_page = service.list_courses(1, None)?;
    if first_page.items.is_empty() {
        let created = service.create_course(SAMPLE_COURSE_NAME, None)?;
        println!("seeded course id={}", created.id);
    }

    let page = service.list_courses(1, None)?;
    for course in &page.items {
        println!("{}\t{}", course.id, course.name);
    }
    println!(
        "listed={} limit={} has_next_page={}",
        page.items.len(),
        page.applied_limit,
        page.has_next_page
    );
    Ok(())
}
