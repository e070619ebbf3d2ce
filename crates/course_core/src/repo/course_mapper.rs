//! Conversions between `Course` and its storage rows.

use crate::model::course::{Course, CourseName};
use crate::repo::course_repo::RepoError;
use crate::store::{CourseNameRow, CourseRow};
use uuid::Uuid;

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.hyphenated().to_string(),
            name: course.name.clone(),
            description: course.description.clone(),
            created_at: course.created_at.unwrap_or_default(),
            updated_at: course.updated_at.unwrap_or_default(),
        }
    }
}

impl TryFrom<CourseRow> for Course {
    type Error = RepoError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{}` in course.id", row.id))
        })?;

        let course = Course {
            id,
            name: row.name,
            description: row.description,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        };
        course
            .validate()
            .map_err(|err| RepoError::InvalidData(format!("course {id}: {err}")))?;
        Ok(course)
    }
}

impl From<CourseNameRow> for CourseName {
    fn from(row: CourseNameRow) -> Self {
        Self { name: row.name }
    }
}
