use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    administrator::{Administrator, AdministratorFields},
    course::{Course, CourseFields},
    school::{School, SchoolFields},
    student::{Student, StudentFields},
    teacher::{Teacher, TeacherFields},
    transfer::{TransferDisposition, TransferRequest},
};
use crate::pagination::Window;

#[async_trait]
pub trait SchoolRepository: Send + Sync {
    async fn create_school(&self, fields: &SchoolFields) -> Result<School>;
    async fn get_school(&self, id: i64) -> Result<Option<School>>;
    async fn list_schools(&self) -> Result<Vec<School>>;
    async fn page_schools(&self, window: Window) -> Result<Vec<School>>;
    async fn count_schools(&self) -> Result<i64>;
    async fn update_school(&self, id: i64, fields: &SchoolFields) -> Result<Option<School>>;
    async fn delete_school(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait AdministratorRepository: Send + Sync {
    async fn create_administrator(&self, fields: &AdministratorFields) -> Result<Administrator>;
    async fn get_administrator(&self, id: i64) -> Result<Option<Administrator>>;
    async fn list_administrators(&self) -> Result<Vec<Administrator>>;
    async fn page_administrators(&self, window: Window) -> Result<Vec<Administrator>>;
    async fn count_administrators(&self) -> Result<i64>;
    async fn update_administrator(
        &self,
        id: i64,
        fields: &AdministratorFields,
    ) -> Result<Option<Administrator>>;
    async fn delete_administrator(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn create_teacher(&self, fields: &TeacherFields) -> Result<Teacher>;
    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn page_teachers(&self, window: Window) -> Result<Vec<Teacher>>;
    async fn count_teachers(&self) -> Result<i64>;
    async fn update_teacher(&self, id: i64, fields: &TeacherFields) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create_course(&self, fields: &CourseFields) -> Result<Course>;
    async fn get_course(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn page_courses(&self, window: Window) -> Result<Vec<Course>>;
    async fn count_courses(&self) -> Result<i64>;
    async fn update_course(&self, id: i64, fields: &CourseFields) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn create_student(&self, fields: &StudentFields) -> Result<Student>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;
    /// Ordered by name, ascending. Paging follows the same order.
    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn page_students(&self, window: Window) -> Result<Vec<Student>>;
    async fn count_students(&self) -> Result<i64>;
    async fn update_student(&self, id: i64, fields: &StudentFields) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
}

/// Per-school row counts. Each count is an independent read.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn count_courses_in_school(&self, school_id: i64) -> Result<i64>;
    async fn count_administrators_in_school(&self, school_id: i64) -> Result<i64>;
    async fn count_teachers_in_school(&self, school_id: i64) -> Result<i64>;
    async fn count_students_in_school(&self, school_id: i64) -> Result<i64>;
}

#[async_trait]
pub trait TransferRepository: Send + Sync {
    /// Check and move a student inside one transaction. Checks run in order:
    /// student exists, student is in `from_course_id`, `to_course_id` exists.
    async fn transfer_student(&self, request: &TransferRequest) -> Result<TransferDisposition>;
}

/// Combined repository trait for all entity types.
pub trait CampusRepository:
    SchoolRepository
    + AdministratorRepository
    + TeacherRepository
    + CourseRepository
    + StudentRepository
    + StatsRepository
    + TransferRepository
{
}
