//! Handlers for the `/recipients` resource.
//!
//! Recipients register as `pending` and cannot log in until an admin
//! verifies them and issues an access code.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use donation_core::error::CoreError;
use donation_core::recipient::is_well_formed_access_code;
use donation_core::types::DbId;
use donation_db::models::distribution::RecipientDistribution;
use donation_db::models::item_request::RecipientRequest;
use donation_db::models::recipient::{CreateRecipient, Recipient, UpdateRecipient};
use donation_db::repositories::RecipientRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /recipients/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRecipientRequest {
    #[validate(length(min = 1, max = 200))]
    pub org_name: String,
    #[validate(length(max = 100))]
    pub org_type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub contact_person: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub address: String,
    #[validate(length(max = 10000))]
    pub application_letter: Option<String>,
}

/// Request body for `POST /recipients/login`.
#[derive(Debug, Deserialize)]
pub struct RecipientLoginRequest {
    pub access_code: String,
}

/// Request body for `PUT /recipients/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecipientRequest {
    #[validate(length(min = 1, max = 200))]
    pub org_name: Option<String>,
    #[validate(length(max = 100))]
    pub org_type: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub contact_person: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub address: Option<String>,
}

/// POST /api/v1/recipients/register
///
/// The phone number doubles as the recipient's unique contact key.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRecipientRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Recipient>>)> {
    input.validate()?;

    let phone = input.phone.trim().to_string();
    if RecipientRepo::find_by_phone(&state.pool, &phone).await?.is_some() {
        return Err(CoreError::Conflict("Phone number already registered".into()).into());
    }

    let recipient = RecipientRepo::create(
        &state.pool,
        &CreateRecipient {
            org_name: input.org_name,
            org_type: input.org_type,
            contact_person: input.contact_person,
            phone,
            email: input.email,
            address: input.address,
            application_letter: input.application_letter,
        },
    )
    .await?;

    tracing::info!(recipient_id = recipient.id, "Recipient registered, awaiting verification");
    Ok((StatusCode::CREATED, Json(DataResponse { data: recipient })))
}

/// POST /api/v1/recipients/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<RecipientLoginRequest>,
) -> AppResult<Json<DataResponse<Recipient>>> {
    let code = input.access_code.trim().to_ascii_uppercase();
    if !is_well_formed_access_code(&code) {
        return Err(invalid_access_code());
    }

    let recipient = RecipientRepo::find_verified_by_access_code(&state.pool, &code)
        .await?
        .ok_or_else(invalid_access_code)?;

    tracing::info!(recipient_id = recipient.id, "Recipient logged in");
    Ok(Json(DataResponse { data: recipient }))
}

/// GET /api/v1/recipients/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Recipient>>> {
    let recipient = RecipientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Recipient", id })?;
    Ok(Json(DataResponse { data: recipient }))
}

/// PUT /api/v1/recipients/{id}
///
/// Verification status and access code are not editable here.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateRecipientRequest>,
) -> AppResult<Json<DataResponse<Recipient>>> {
    input.validate()?;

    let recipient = RecipientRepo::update(
        &state.pool,
        id,
        &UpdateRecipient {
            org_name: input.org_name,
            org_type: input.org_type,
            contact_person: input.contact_person,
            phone: input.phone.map(|p| p.trim().to_string()),
            email: input.email,
            address: input.address,
        },
    )
    .await?
    .ok_or(CoreError::NotFound { entity: "Recipient", id })?;

    Ok(Json(DataResponse { data: recipient }))
}

/// GET /api/v1/recipients/{id}/requests
pub async fn list_requests(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RecipientRequest>>>> {
    let requests = state.engine.list_requests_by_recipient(&state.pool, id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/recipients/{id}/distributions
pub async fn list_distributions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RecipientDistribution>>>> {
    let distributions = state
        .engine
        .list_distributions_by_recipient(&state.pool, id)
        .await?;
    Ok(Json(DataResponse { data: distributions }))
}

fn invalid_access_code() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid access code or account not approved yet".into(),
    ))
}
