//! Handlers for the shared item pool.

use axum::extract::State;
use axum::Json;
use donation_db::models::item::AvailableItem;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/items/available
pub async fn list_available(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AvailableItem>>>> {
    let items = state.engine.list_available_items(&state.pool).await?;
    Ok(Json(DataResponse { data: items }))
}
