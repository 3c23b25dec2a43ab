//! Student transfer endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use campus_core::models::transfer::{TransferOutcome, TransferPayload};
use campus_core::transfer;
use campus_core::validation::Validate;

use crate::error::ApiError;
use crate::AppState;

/// `POST /api/transfer`
///
/// Rejected transfers still answer 200; the body says what went wrong.
/// Only a malformed body is a 400.
pub async fn transfer_student(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TransferPayload>, JsonRejection>,
) -> Result<Json<TransferOutcome>, ApiError> {
    let Json(payload) = body?;
    let request = payload.validate(&state.repo).await?;
    Ok(Json(transfer::transfer(&state.repo, &request).await?))
}
