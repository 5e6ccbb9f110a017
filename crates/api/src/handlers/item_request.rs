//! Handlers for recipient item requests.
//!
//! Submission and cancellation both move the item's availability, so they
//! run through the allocation engine rather than the repositories directly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use donation_core::types::DbId;
use validator::Validate;

use crate::engine::allocation::{SubmitOutcome, SubmitRequest};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// POST /api/v1/requests
///
/// Returns 201 with the created request and, under auto-approval, the
/// distribution recorded alongside it.
pub async fn submit(
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitOutcome>>)> {
    input.validate()?;
    let outcome = state.engine.submit_request(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// DELETE /api/v1/requests/{id}
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.engine.cancel_request(&state.pool, id).await?;
    Ok(Json(MessageResponse {
        message: "Request cancelled",
    }))
}
