use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

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

use super::repository::{
    AdministratorRepository, CampusRepository, CourseRepository, SchoolRepository,
    StatsRepository, StudentRepository, TeacherRepository, TransferRepository,
};

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run a `COUNT(*) AS n` query, optionally scoped to one school.
    async fn count(&self, sql: &str, school_id: Option<i64>) -> Result<i64> {
        let mut query = sqlx::query(sql);
        if let Some(id) = school_id {
            query = query.bind(id);
        }
        let row = query.fetch_one(&self.pool).await?;
        Ok(row.get("n"))
    }
}

impl CampusRepository for SqliteRepository {}

// -- Row mappers --

fn row_to_school(r: &SqliteRow) -> School {
    School {
        id: r.get("id"),
        name: r.get("name"),
        address: r.get("address"),
    }
}

fn row_to_administrator(r: &SqliteRow) -> Administrator {
    Administrator {
        id: r.get("id"),
        name: r.get("name"),
        school_id: r.get("school_id"),
    }
}

fn row_to_teacher(r: &SqliteRow) -> Teacher {
    Teacher {
        id: r.get("id"),
        name: r.get("name"),
        school_id: r.get("school_id"),
    }
}

fn row_to_course(r: &SqliteRow) -> Course {
    Course {
        id: r.get("id"),
        name: r.get("name"),
        location: r.get("location"),
        school_id: r.get("school_id"),
        teacher_id: r.get("teacher_id"),
    }
}

fn row_to_student(r: &SqliteRow) -> Student {
    Student {
        id: r.get("id"),
        name: r.get("name"),
        school_id: r.get("school_id"),
        course_id: r.get("course_id"),
    }
}

// -- SchoolRepository --

#[async_trait]
impl SchoolRepository for SqliteRepository {
    async fn create_school(&self, fields: &SchoolFields) -> Result<School> {
        let result = sqlx::query("INSERT INTO schools (name, address) VALUES (?1, ?2)")
            .bind(&fields.name)
            .bind(&fields.address)
            .execute(&self.pool)
            .await?;
        Ok(School {
            id: result.last_insert_rowid(),
            name: fields.name.clone(),
            address: fields.address.clone(),
        })
    }

    async fn get_school(&self, id: i64) -> Result<Option<School>> {
        let row = sqlx::query("SELECT id, name, address FROM schools WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_school))
    }

    async fn list_schools(&self) -> Result<Vec<School>> {
        self.page_schools(Window::ALL).await
    }

    async fn page_schools(&self, window: Window) -> Result<Vec<School>> {
        let rows = sqlx::query(
            "SELECT id, name, address FROM schools ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_school).collect())
    }

    async fn count_schools(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) AS n FROM schools", None).await
    }

    async fn update_school(&self, id: i64, fields: &SchoolFields) -> Result<Option<School>> {
        let result = sqlx::query("UPDATE schools SET name = ?1, address = ?2 WHERE id = ?3")
            .bind(&fields.name)
            .bind(&fields.address)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(School {
            id,
            name: fields.name.clone(),
            address: fields.address.clone(),
        }))
    }

    async fn delete_school(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM schools WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// -- AdministratorRepository --

#[async_trait]
impl AdministratorRepository for SqliteRepository {
    async fn create_administrator(&self, fields: &AdministratorFields) -> Result<Administrator> {
        let result = sqlx::query("INSERT INTO administrators (name, school_id) VALUES (?1, ?2)")
            .bind(&fields.name)
            .bind(fields.school_id)
            .execute(&self.pool)
            .await?;
        Ok(Administrator {
            id: result.last_insert_rowid(),
            name: fields.name.clone(),
            school_id: fields.school_id,
        })
    }

    async fn get_administrator(&self, id: i64) -> Result<Option<Administrator>> {
        let row = sqlx::query("SELECT id, name, school_id FROM administrators WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_administrator))
    }

    async fn list_administrators(&self) -> Result<Vec<Administrator>> {
        self.page_administrators(Window::ALL).await
    }

    async fn page_administrators(&self, window: Window) -> Result<Vec<Administrator>> {
        let rows = sqlx::query(
            "SELECT id, name, school_id FROM administrators ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_administrator).collect())
    }

    async fn count_administrators(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) AS n FROM administrators", None).await
    }

    async fn update_administrator(
        &self,
        id: i64,
        fields: &AdministratorFields,
    ) -> Result<Option<Administrator>> {
        let result =
            sqlx::query("UPDATE administrators SET name = ?1, school_id = ?2 WHERE id = ?3")
                .bind(&fields.name)
                .bind(fields.school_id)
                .bind(id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Administrator {
            id,
            name: fields.name.clone(),
            school_id: fields.school_id,
        }))
    }

    async fn delete_administrator(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM administrators WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// -- TeacherRepository --

#[async_trait]
impl TeacherRepository for SqliteRepository {
    async fn create_teacher(&self, fields: &TeacherFields) -> Result<Teacher> {
        let result = sqlx::query("INSERT INTO teachers (name, school_id) VALUES (?1, ?2)")
            .bind(&fields.name)
            .bind(fields.school_id)
            .execute(&self.pool)
            .await?;
        Ok(Teacher {
            id: result.last_insert_rowid(),
            name: fields.name.clone(),
            school_id: fields.school_id,
        })
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        let row = sqlx::query("SELECT id, name, school_id FROM teachers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_teacher))
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.page_teachers(Window::ALL).await
    }

    async fn page_teachers(&self, window: Window) -> Result<Vec<Teacher>> {
        let rows = sqlx::query(
            "SELECT id, name, school_id FROM teachers ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_teacher).collect())
    }

    async fn count_teachers(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) AS n FROM teachers", None).await
    }

    async fn update_teacher(&self, id: i64, fields: &TeacherFields) -> Result<Option<Teacher>> {
        let result = sqlx::query("UPDATE teachers SET name = ?1, school_id = ?2 WHERE id = ?3")
            .bind(&fields.name)
            .bind(fields.school_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Teacher {
            id,
            name: fields.name.clone(),
            school_id: fields.school_id,
        }))
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// -- CourseRepository --

#[async_trait]
impl CourseRepository for SqliteRepository {
    async fn create_course(&self, fields: &CourseFields) -> Result<Course> {
        let result = sqlx::query(
            "INSERT INTO courses (name, location, school_id, teacher_id) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&fields.name)
        .bind(&fields.location)
        .bind(fields.school_id)
        .bind(fields.teacher_id)
        .execute(&self.pool)
        .await?;
        Ok(Course {
            id: result.last_insert_rowid(),
            name: fields.name.clone(),
            location: fields.location.clone(),
            school_id: fields.school_id,
            teacher_id: fields.teacher_id,
        })
    }

    async fn get_course(&self, id: i64) -> Result<Option<Course>> {
        let row = sqlx::query(
            "SELECT id, name, location, school_id, teacher_id FROM courses WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_course))
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        self.page_courses(Window::ALL).await
    }

    async fn page_courses(&self, window: Window) -> Result<Vec<Course>> {
        let rows = sqlx::query(
            "SELECT id, name, location, school_id, teacher_id FROM courses ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_course).collect())
    }

    async fn count_courses(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) AS n FROM courses", None).await
    }

    async fn update_course(&self, id: i64, fields: &CourseFields) -> Result<Option<Course>> {
        let result = sqlx::query(
            "UPDATE courses SET name = ?1, location = ?2, school_id = ?3, teacher_id = ?4 WHERE id = ?5",
        )
        .bind(&fields.name)
        .bind(&fields.location)
        .bind(fields.school_id)
        .bind(fields.teacher_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Course {
            id,
            name: fields.name.clone(),
            location: fields.location.clone(),
            school_id: fields.school_id,
            teacher_id: fields.teacher_id,
        }))
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// -- StudentRepository --

#[async_trait]
impl StudentRepository for SqliteRepository {
    async fn create_student(&self, fields: &StudentFields) -> Result<Student> {
        let result =
            sqlx::query("INSERT INTO students (name, school_id, course_id) VALUES (?1, ?2, ?3)")
                .bind(&fields.name)
                .bind(fields.school_id)
                .bind(fields.course_id)
                .execute(&self.pool)
                .await?;
        Ok(Student {
            id: result.last_insert_rowid(),
            name: fields.name.clone(),
            school_id: fields.school_id,
            course_id: fields.course_id,
        })
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        let row = sqlx::query("SELECT id, name, school_id, course_id FROM students WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_student))
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.page_students(Window::ALL).await
    }

    async fn page_students(&self, window: Window) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            "SELECT id, name, school_id, course_id FROM students ORDER BY name ASC, id ASC LIMIT ?1 OFFSET ?2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_student).collect())
    }

    async fn count_students(&self) -> Result<i64> {
        self.count("SELECT COUNT(*) AS n FROM students", None).await
    }

    async fn update_student(&self, id: i64, fields: &StudentFields) -> Result<Option<Student>> {
        let result = sqlx::query(
            "UPDATE students SET name = ?1, school_id = ?2, course_id = ?3 WHERE id = ?4",
        )
        .bind(&fields.name)
        .bind(fields.school_id)
        .bind(fields.course_id)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Student {
            id,
            name: fields.name.clone(),
            school_id: fields.school_id,
            course_id: fields.course_id,
        }))
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// -- StatsRepository --

#[async_trait]
impl StatsRepository for SqliteRepository {
    async fn count_courses_in_school(&self, school_id: i64) -> Result<i64> {
        self.count(
            "SELECT COUNT(*) AS n FROM courses WHERE school_id = ?1",
            Some(school_id),
        )
        .await
    }

    async fn count_administrators_in_school(&self, school_id: i64) -> Result<i64> {
        self.count(
            "SELECT COUNT(*) AS n FROM administrators WHERE school_id = ?1",
            Some(school_id),
        )
        .await
    }

    async fn count_teachers_in_school(&self, school_id: i64) -> Result<i64> {
        self.count(
            "SELECT COUNT(*) AS n FROM teachers WHERE school_id = ?1",
            Some(school_id),
        )
        .await
    }

    async fn count_students_in_school(&self, school_id: i64) -> Result<i64> {
        self.count(
            "SELECT COUNT(*) AS n FROM students WHERE school_id = ?1",
            Some(school_id),
        )
        .await
    }
}

// -- TransferRepository --

#[async_trait]
impl TransferRepository for SqliteRepository {
    async fn transfer_student(&self, request: &TransferRequest) -> Result<TransferDisposition> {
        // The guarded UPDATE comes first so the transaction takes the write
        // lock before reading anything. A deferred transaction that reads
        // first cannot wait for that lock and fails with SQLITE_BUSY instead.
        // Dropping `tx` on an early return rolls back.
        let mut tx = self.pool.begin().await?;

        let moved = sqlx::query(
            "UPDATE students SET course_id = ?1 \
             WHERE id = ?2 AND course_id = ?3 \
             AND EXISTS (SELECT 1 FROM courses WHERE id = ?1)",
        )
        .bind(request.to_course_id)
        .bind(request.student_id)
        .bind(request.from_course_id)
        .execute(&mut *tx)
        .await?;
        if moved.rows_affected() == 1 {
            tx.commit().await?;
            return Ok(TransferDisposition::Transferred);
        }

        // Nothing moved; work out why while still holding the lock.
        let student = sqlx::query("SELECT course_id FROM students WHERE id = ?1")
            .bind(request.student_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(student) = student else {
            return Ok(TransferDisposition::StudentMissing);
        };

        let current_course: i64 = student.get("course_id");
        if current_course != request.from_course_id {
            return Ok(TransferDisposition::NotEnrolled);
        }

        Ok(TransferDisposition::CourseMissing)
    }
}
