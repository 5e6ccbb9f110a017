//! Handlers for the `/distributions` resource.

use axum::extract::{Path, State};
use axum::Json;
use donation_core::types::DbId;
use donation_db::models::distribution::Distribution;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /distributions/{id}/rating`.
///
/// The column names `satisfaction_rating` / `recipient_feedback` are accepted
/// as well.
#[derive(Debug, Deserialize, Validate)]
pub struct RateDistributionRequest {
    #[serde(alias = "satisfaction_rating")]
    pub rating: i16,
    #[serde(alias = "recipient_feedback")]
    #[validate(length(max = 2000))]
    pub feedback: Option<String>,
}

/// PUT /api/v1/distributions/{id}/rating
///
/// Rating again overwrites the previous rating and feedback.
pub async fn rate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<RateDistributionRequest>,
) -> AppResult<Json<DataResponse<Distribution>>> {
    input.validate()?;
    let distribution = state
        .engine
        .rate_distribution(&state.pool, id, input.rating, input.feedback.as_deref())
        .await?;
    Ok(Json(DataResponse { data: distribution }))
}
