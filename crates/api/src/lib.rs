//! Campus API: JSON REST endpoints for schools, administrators, teachers,
//! courses and students, plus per-school stats and student transfers.

pub mod error;
pub mod resources;
pub mod schools;
pub mod transfer;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use campus_core::config::CampusConfig;
use campus_core::db::sqlite::SqliteRepository;
use campus_core::models::{
    administrator::Administrator, course::Course, school::School, student::Student,
    teacher::Teacher,
};

use crate::resources::resource_router;

/// Shared application state for all API routes.
pub struct AppState {
    pub repo: SqliteRepository,
    pub config: CampusConfig,
}

/// Build the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .with_state(state)
}

/// Routes mounted under `/api`.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(resource_router::<School>("/schools"))
        .merge(resource_router::<Course>("/courses"))
        .merge(resource_router::<Administrator>("/admins"))
        .merge(resource_router::<Teacher>("/teachers"))
        .merge(resource_router::<Student>("/students"))
        .route("/schools/:id/stats", get(schools::school_stats))
        .route("/transfer", post(transfer::transfer_student))
}

async fn health() -> &'static str {
    "ok"
}
