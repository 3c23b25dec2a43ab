//! Per-school aggregate counts.

use tracing::debug;

use crate::db::repository::{CampusRepository, SchoolRepository, StatsRepository};
use crate::error::{CampusError, Result};
use crate::models::stats::SchoolStats;

/// Count the courses, administrators, teachers and students of one school.
///
/// The four counts are separate reads; no snapshot isolation is attempted.
pub async fn school_stats(repo: &dyn CampusRepository, school_id: i64) -> Result<SchoolStats> {
    if repo.get_school(school_id).await?.is_none() {
        return Err(CampusError::not_found("school", school_id));
    }

    let stats = SchoolStats {
        id: school_id,
        courses: repo.count_courses_in_school(school_id).await?,
        admins: repo.count_administrators_in_school(school_id).await?,
        teachers: repo.count_teachers_in_school(school_id).await?,
        students: repo.count_students_in_school(school_id).await?,
    };
    debug!(?stats, "Computed school stats");
    Ok(stats)
}
