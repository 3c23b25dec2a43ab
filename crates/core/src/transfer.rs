//! Moving a student from one course to another.

use tracing::{info, warn};

use crate::db::repository::{CampusRepository, TransferRepository};
use crate::error::Result;
use crate::models::transfer::{TransferDisposition, TransferOutcome, TransferRequest};

/// Transfer a student between courses.
///
/// Business-rule failures come back as an unsuccessful [`TransferOutcome`];
/// only storage failures are errors. The check-and-move runs in a single
/// transaction, so the enrollment cannot change between the check and the
/// write.
pub async fn transfer(
    repo: &dyn CampusRepository,
    request: &TransferRequest,
) -> Result<TransferOutcome> {
    let disposition = repo.transfer_student(request).await?;
    let outcome = outcome_for(request, disposition);

    if outcome.success {
        info!(
            student_id = request.student_id,
            from = request.from_course_id,
            to = request.to_course_id,
            "Transferred student"
        );
    } else {
        warn!(
            student_id = request.student_id,
            reason = %outcome.message,
            "Transfer rejected"
        );
    }
    Ok(outcome)
}

/// Client-facing wording for each disposition. The texts are a compatibility
/// contract with existing clients, spelling included.
fn outcome_for(request: &TransferRequest, disposition: TransferDisposition) -> TransferOutcome {
    let (success, message) = match disposition {
        TransferDisposition::StudentMissing => (false, "Student doest not exist.".to_string()),
        TransferDisposition::NotEnrolled => (
            false,
            format!(
                "Student isn't included the course {}",
                request.from_course_id
            ),
        ),
        TransferDisposition::CourseMissing => (
            false,
            format!("Course {} does not exist", request.to_course_id),
        ),
        TransferDisposition::Transferred => (
            true,
            format!(
                "Successfully transferred Student {} from Course {} to Course {}",
                request.student_id, request.from_course_id, request.to_course_id
            ),
        ),
    };
    TransferOutcome { success, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{
        CourseRepository, SchoolRepository, StudentRepository, TeacherRepository,
    };
    use crate::db::sqlite::SqliteRepository;
    use crate::db::DatabasePool;
    use crate::models::{
        course::CourseFields, school::SchoolFields, student::StudentFields,
        teacher::TeacherFields,
    };

    struct Fixture {
        repo: SqliteRepository,
        student_id: i64,
        course1: i64,
        course2: i64,
    }

    async fn setup() -> Fixture {
        let pool = DatabasePool::new_sqlite_memory().await.unwrap();
        let repo = match pool {
            DatabasePool::Sqlite(p) => SqliteRepository::new(p),
        };
        seed(repo).await
    }

    async fn seed(repo: SqliteRepository) -> Fixture {
        let school = repo
            .create_school(&SchoolFields {
                name: "Primary School".to_string(),
                address: "Test Address".to_string(),
            })
            .await
            .unwrap();
        let mut courses = Vec::new();
        for n in 1..=2 {
            let teacher = repo
                .create_teacher(&TeacherFields {
                    name: format!("Teacher {n}"),
                    school_id: school.id,
                })
                .await
                .unwrap();
            let course = repo
                .create_course(&CourseFields {
                    name: format!("Course {n}"),
                    location: format!("Room {n}"),
                    school_id: school.id,
                    teacher_id: teacher.id,
                })
                .await
                .unwrap();
            courses.push(course.id);
        }
        let student = repo
            .create_student(&StudentFields {
                name: "Student 1".to_string(),
                school_id: school.id,
                course_id: courses[0],
            })
            .await
            .unwrap();
        Fixture {
            repo,
            student_id: student.id,
            course1: courses[0],
            course2: courses[1],
        }
    }

    #[tokio::test]
    async fn successful_transfer_updates_enrollment() {
        let fx = setup().await;
        let request = TransferRequest {
            student_id: fx.student_id,
            from_course_id: fx.course1,
            to_course_id: fx.course2,
        };
        let outcome = transfer(&fx.repo, &request).await.unwrap();
        assert!(outcome.success);
        assert_eq!(
            outcome.message,
            format!(
                "Successfully transferred Student {} from Course {} to Course {}",
                fx.student_id, fx.course1, fx.course2
            )
        );

        let student = fx.repo.get_student(fx.student_id).await.unwrap().unwrap();
        assert_eq!(student.course_id, fx.course2);
    }

    #[tokio::test]
    async fn missing_student_reported() {
        let fx = setup().await;
        let request = TransferRequest {
            student_id: 0,
            from_course_id: fx.course1,
            to_course_id: fx.course2,
        };
        let outcome = transfer(&fx.repo, &request).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Student doest not exist.");
    }

    #[tokio::test]
    async fn repeated_transfer_fails_on_source_course() {
        let fx = setup().await;
        let request = TransferRequest {
            student_id: fx.student_id,
            from_course_id: fx.course1,
            to_course_id: fx.course2,
        };
        assert!(transfer(&fx.repo, &request).await.unwrap().success);

        let outcome = transfer(&fx.repo, &request).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(
            outcome.message,
            format!("Student isn't included the course {}", fx.course1)
        );
    }

    #[tokio::test]
    async fn missing_target_course_reported() {
        let fx = setup().await;
        let request = TransferRequest {
            student_id: fx.student_id,
            from_course_id: fx.course1,
            to_course_id: 0,
        };
        let outcome = transfer(&fx.repo, &request).await.unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.message, "Course 0 does not exist");

        let student = fx.repo.get_student(fx.student_id).await.unwrap().unwrap();
        assert_eq!(student.course_id, fx.course1);
    }

    #[test]
    fn not_enrolled_message_names_source_course() {
        let request = TransferRequest {
            student_id: 1,
            from_course_id: 2,
            to_course_id: 3,
        };
        let outcome = outcome_for(&request, TransferDisposition::NotEnrolled);
        assert_eq!(outcome.message, "Student isn't included the course 2");
    }

    fn remove_db_files(path: &std::path::Path) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_transfers_resolve_in_band() {
        let path = std::env::temp_dir().join(format!(
            "campus_test_transfer_race_{}.db",
            std::process::id()
        ));
        remove_db_files(&path);
        let url = format!("sqlite:{}?mode=rwc", path.display());
        let DatabasePool::Sqlite(pool) = DatabasePool::new_sqlite(&url).await.unwrap();
        let fx = seed(SqliteRepository::new(pool)).await;

        for round in 0..10 {
            let (from, to) = if round % 2 == 0 {
                (fx.course1, fx.course2)
            } else {
                (fx.course2, fx.course1)
            };
            let request = TransferRequest {
                student_id: fx.student_id,
                from_course_id: from,
                to_course_id: to,
            };

            let mut handles = Vec::new();
            for _ in 0..8 {
                let repo = fx.repo.clone();
                handles.push(tokio::spawn(
                    async move { transfer(&repo, &request).await },
                ));
            }

            let mut moved = 0;
            for handle in handles {
                let outcome = handle.await.unwrap().unwrap();
                if outcome.success {
                    moved += 1;
                } else {
                    assert_eq!(
                        outcome.message,
                        format!("Student isn't included the course {from}")
                    );
                }
            }
            assert_eq!(moved, 1, "round {round}");

            let student = fx.repo.get_student(fx.student_id).await.unwrap().unwrap();
            assert_eq!(student.course_id, to);
        }

        fx.repo.pool().close().await;
        remove_db_files(&path);
    }
}
