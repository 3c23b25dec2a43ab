//! School-scoped queries beyond plain CRUD.

use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use campus_core::models::stats::SchoolStats;
use campus_core::stats;

use crate::error::ApiError;
use crate::AppState;

/// `GET /api/schools/:id/stats`
pub async fn school_stats(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SchoolStats>, ApiError> {
    let Path(id) = id?;
    Ok(Json(stats::school_stats(&state.repo, id).await?))
}
