//! Handlers for the `/admin` resource: recipient verification, request
//! decisions, the platform overviews, and the admin's own profile.

use axum::extract::{Path, Query, State};
use axum::Json;
use donation_core::accounts::{normalize_email, resolve_account_status_filter, ACCOUNT_ACTIVE};
use donation_core::allocation::{ItemStatus, RequestStatus};
use donation_core::error::CoreError;
use donation_core::recipient::{
    generate_access_code, resolve_status_filter, validate_pending, MAX_ACCESS_CODE_ATTEMPTS,
};
use donation_core::types::DbId;
use donation_db::models::admin::{Admin, UpdateAdmin};
use donation_db::models::distribution::AdminDistributionRow;
use donation_db::models::donor::DonorSummary;
use donation_db::models::item::Item;
use donation_db::models::item_request::AdminRequestRow;
use donation_db::models::recipient::Recipient;
use donation_db::repositories::{
    AdminRepo, DistributionRepo, DonorRepo, ItemRepo, ItemRequestRepo, RecipientRepo,
};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::auth::password::{password_matches, prepare_password};
use crate::engine::allocation::{DecideRequest, DecisionOutcome};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::query::StatusFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /admin/recipients/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct ApproveRecipientRequest {
    pub admin_id: DbId,
}

/// Request body for `POST /admin/recipients/{id}/reject`.
#[derive(Debug, Deserialize, Validate)]
pub struct RejectRecipientRequest {
    pub admin_id: DbId,
    #[validate(length(min = 1, max = 2000, message = "Rejection reason is required"))]
    pub reason: String,
}

/// Request body for `PUT /admin/{id}/profile`.
///
/// Changing the password requires `current_password`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdminProfileRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<AdminLoginRequest>,
) -> AppResult<Json<DataResponse<Admin>>> {
    input.validate()?;

    let email = normalize_email(&input.email);
    let admin = AdminRepo::find_by_email(&state.pool, &email)
        .await?
        .filter(|a| a.status == ACCOUNT_ACTIVE)
        .ok_or_else(invalid_credentials)?;

    if !password_matches(&input.password, &admin.password_hash) {
        tracing::warn!(admin_id = admin.id, "Admin login failed: wrong password");
        return Err(invalid_credentials());
    }

    AdminRepo::record_login(&state.pool, admin.id).await?;
    tracing::info!(admin_id = admin.id, "Admin logged in");
    Ok(Json(DataResponse { data: admin }))
}

// ---------------------------------------------------------------------------
// Recipient verification
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/recipients?status=
///
/// Defaults to `pending`; `status=all` lists every recipient.
pub async fn list_recipients(
    State(state): State<AppState>,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Recipient>>>> {
    let status = resolve_status_filter(params.status.as_deref())?;
    let recipients = RecipientRepo::list_by_status(&state.pool, status).await?;
    tracing::debug!(count = recipients.len(), ?status, "Listed recipients");
    Ok(Json(DataResponse { data: recipients }))
}

/// POST /api/v1/admin/recipients/{id}/approve
///
/// Verifies a pending recipient and issues a fresh access code.
pub async fn approve_recipient(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ApproveRecipientRequest>,
) -> AppResult<Json<DataResponse<Recipient>>> {
    let admin = require_active_admin(&state.pool, input.admin_id).await?;
    let recipient = find_recipient(&state.pool, id).await?;
    validate_pending(&recipient.verification_status)?;

    let code = unused_access_code(&state.pool).await?;

    // The UPDATE re-checks `pending`, so a concurrent decision loses here.
    let verified = RecipientRepo::verify(&state.pool, id, admin.id, &code)
        .await?
        .ok_or_else(|| CoreError::InvalidState("Recipient is not in pending status".into()))?;

    tracing::info!(recipient_id = id, admin_id = admin.id, "Recipient verified");
    Ok(Json(DataResponse { data: verified }))
}

/// POST /api/v1/admin/recipients/{id}/reject
pub async fn reject_recipient(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<RejectRecipientRequest>,
) -> AppResult<Json<DataResponse<Recipient>>> {
    input.validate()?;
    let reason = input.reason.trim();
    if reason.is_empty() {
        return Err(CoreError::InvalidArgument("Rejection reason is required".into()).into());
    }

    let admin = require_active_admin(&state.pool, input.admin_id).await?;
    let recipient = find_recipient(&state.pool, id).await?;
    validate_pending(&recipient.verification_status)?;

    let rejected = RecipientRepo::reject(&state.pool, id, admin.id, reason)
        .await?
        .ok_or_else(|| CoreError::InvalidState("Recipient is not in pending status".into()))?;

    tracing::info!(recipient_id = id, admin_id = admin.id, "Recipient rejected");
    Ok(Json(DataResponse { data: rejected }))
}

// ---------------------------------------------------------------------------
// Requests and items
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/requests?status=
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<AdminRequestRow>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RequestStatus::from_str)
        .transpose()?;
    let requests = ItemRequestRepo::list_for_admin(&state.pool, status).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// PUT /api/v1/admin/requests/{id}
///
/// Body: `{ "status": "approved" | "rejected" | "in_fulfillment" | "completed", ... }`.
pub async fn decide_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<DecideRequest>,
) -> AppResult<Json<DataResponse<DecisionOutcome>>> {
    input.validate()?;
    let outcome = state.engine.decide_request(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/admin/items?status=
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<Item>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ItemStatus::from_str)
        .transpose()?;
    let items = ItemRepo::list_all(&state.pool, status).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/admin/donors?status=
///
/// Every donor with item totals. `status` is `active`, `inactive`, or `all`.
pub async fn list_donors(
    State(state): State<AppState>,
    Query(params): Query<StatusFilterParams>,
) -> AppResult<Json<DataResponse<Vec<DonorSummary>>>> {
    let status = resolve_account_status_filter(params.status.as_deref())?;
    let donors = DonorRepo::list_with_totals(&state.pool, status).await?;
    Ok(Json(DataResponse { data: donors }))
}

/// GET /api/v1/admin/distributions
pub async fn list_distributions(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdminDistributionRow>>>> {
    let distributions = DistributionRepo::list_for_admin(&state.pool).await?;
    Ok(Json(DataResponse { data: distributions }))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/{id}/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Admin>>> {
    let admin = find_admin(&state.pool, id).await?;
    Ok(Json(DataResponse { data: admin }))
}

/// PUT /api/v1/admin/{id}/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateAdminProfileRequest>,
) -> AppResult<Json<DataResponse<Admin>>> {
    input.validate()?;
    let admin = find_admin(&state.pool, id).await?;

    let password_hash = match input.new_password.as_deref() {
        Some(new_password) => {
            let current = input.current_password.as_deref().unwrap_or("");
            if !password_matches(current, &admin.password_hash) {
                tracing::warn!(admin_id = id, "Admin password change refused");
                return Err(CoreError::Unauthorized("Current password is incorrect".into()).into());
            }
            Some(prepare_password(new_password, state.config.min_password_length)?)
        }
        None => None,
    };
    let changed_password = password_hash.is_some();

    let updated = AdminRepo::update(
        &state.pool,
        id,
        &UpdateAdmin {
            full_name: input.full_name.map(|n| n.trim().to_string()),
            email: input.email.as_deref().map(normalize_email),
            password_hash,
        },
    )
    .await?
    .ok_or(CoreError::NotFound { entity: "Admin", id })?;

    tracing::info!(admin_id = id, changed_password, "Admin profile updated");
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn require_active_admin(pool: &PgPool, id: DbId) -> AppResult<Admin> {
    AdminRepo::find_by_id(pool, id)
        .await?
        .filter(|a| a.status == ACCOUNT_ACTIVE)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Admin", id }))
}

async fn find_admin(pool: &PgPool, id: DbId) -> AppResult<Admin> {
    AdminRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Admin", id }))
}

async fn find_recipient(pool: &PgPool, id: DbId) -> AppResult<Recipient> {
    RecipientRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Recipient", id }))
}

/// Draw access codes until one is not already taken.
async fn unused_access_code(pool: &PgPool) -> AppResult<String> {
    for _ in 0..MAX_ACCESS_CODE_ATTEMPTS {
        let code = generate_access_code();
        if !RecipientRepo::access_code_exists(pool, &code).await? {
            return Ok(code);
        }
        tracing::debug!("Access code collision, retrying");
    }
    Err(CoreError::Internal(format!(
        "No unused access code after {MAX_ACCESS_CODE_ATTEMPTS} attempts"
    ))
    .into())
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}
