//! Handlers for the `/donors` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use donation_core::accounts::{normalize_email, LoginIdentifier, ACCOUNT_ACTIVE};
use donation_core::error::CoreError;
use donation_core::types::DbId;
use donation_db::models::donor::{CreateDonor, Donor, UpdateDonor};
use donation_db::models::item::{CreateItem, Item};
use donation_db::repositories::{DonorRepo, ItemRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{password_matches, prepare_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /donors/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDonorRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(length(min = 1, max = 200))]
    pub institution: String,
    pub password: String,
}

/// Request body for `POST /donors/login`. `identifier` is an email or donor id.
#[derive(Debug, Deserialize, Validate)]
pub struct DonorLoginRequest {
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `PUT /donors/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDonorRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub institution: Option<String>,
}

/// Request body for `POST /donors/{id}/items`.
#[derive(Debug, Deserialize, Validate)]
pub struct DonateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub item_name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(min = 1, max = 100))]
    pub condition: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub estimated_value: Option<f64>,
    #[validate(range(min = 1))]
    pub quantity: Option<i32>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/donors/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterDonorRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Donor>>)> {
    input.validate()?;

    let email = normalize_email(&input.email);
    if DonorRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::Conflict("Email already registered".into()).into());
    }

    let password_hash = prepare_password(&input.password, state.config.min_password_length)?;
    let donor = DonorRepo::create(
        &state.pool,
        &CreateDonor {
            full_name: input.full_name,
            email,
            phone: input.phone,
            institution: input.institution,
            password_hash,
        },
    )
    .await?;

    tracing::info!(donor_id = donor.id, "Donor registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: donor })))
}

/// POST /api/v1/donors/login
///
/// Accepts an email or a numeric donor id plus password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<DonorLoginRequest>,
) -> AppResult<Json<DataResponse<Donor>>> {
    input.validate()?;

    let donor = match LoginIdentifier::parse(&input.identifier) {
        LoginIdentifier::Id(id) => DonorRepo::find_by_id(&state.pool, id).await?,
        LoginIdentifier::Email(email) => DonorRepo::find_by_email(&state.pool, &email).await?,
    }
    .filter(|d| d.status == ACCOUNT_ACTIVE)
    .ok_or_else(invalid_credentials)?;

    if !password_matches(&input.password, &donor.password_hash) {
        tracing::warn!(donor_id = donor.id, "Donor login failed: wrong password");
        return Err(invalid_credentials());
    }

    tracing::info!(donor_id = donor.id, "Donor logged in");
    Ok(Json(DataResponse { data: donor }))
}

/// GET /api/v1/donors/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Donor>>> {
    let donor = find_donor(&state, id).await?;
    Ok(Json(DataResponse { data: donor }))
}

/// PUT /api/v1/donors/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateDonorRequest>,
) -> AppResult<Json<DataResponse<Donor>>> {
    input.validate()?;

    let donor = DonorRepo::update(
        &state.pool,
        id,
        &UpdateDonor {
            full_name: input.full_name,
            phone: input.phone,
            institution: input.institution,
        },
    )
    .await?
    .ok_or(CoreError::NotFound { entity: "Donor", id })?;

    Ok(Json(DataResponse { data: donor }))
}

/// POST /api/v1/donors/{id}/items
///
/// Donate an item. It enters the pool as `available`.
pub async fn donate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<DonateItemRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Item>>)> {
    input.validate()?;

    let donor = find_donor(&state, id).await?;
    if donor.status != ACCOUNT_ACTIVE {
        return Err(CoreError::InvalidState("Donor account is inactive".into()).into());
    }

    let item = ItemRepo::create(
        &state.pool,
        &CreateItem {
            donor_id: donor.id,
            item_name: input.item_name,
            category: input.category,
            condition: input.condition,
            description: input.description,
            estimated_value: input.estimated_value,
            quantity: input.quantity,
        },
    )
    .await?;

    tracing::info!(item_id = item.id, donor_id = donor.id, "Item donated");
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/donors/{id}/items
///
/// The donor's items, newest donation first.
pub async fn list_donations(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Item>>>> {
    find_donor(&state, id).await?;
    let items = ItemRepo::list_by_donor(&state.pool, id).await?;
    tracing::debug!(count = items.len(), donor_id = id, "Listed donations");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_donor(state: &AppState, id: DbId) -> AppResult<Donor> {
    DonorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Donor", id }))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email/ID or password".into(),
    ))
}
