#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use donation_api::auth::password::hash_password;
use donation_api::config::ServerConfig;
use donation_api::router::build_app_router;
use donation_api::state::AppState;
use donation_core::allocation::AllocationPolicy;
use donation_core::types::DbId;
use donation_db::models::admin::{Admin, CreateAdmin};
use donation_db::models::donor::{CreateDonor, Donor};
use donation_db::models::item::{CreateItem, Item};
use donation_db::models::recipient::{CreateRecipient, Recipient};
use donation_db::repositories::{AdminRepo, DonorRepo, ItemRepo, RecipientRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse";

/// Build a test `ServerConfig` with safe defaults and the given policy.
pub fn test_config(policy: AllocationPolicy) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        allocation_policy: policy,
        min_password_length: 8,
        bootstrap_admin: None,
    }
}

/// Full application router under the default review-queue policy.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_policy(pool, AllocationPolicy::ReviewQueue)
}

/// Full application router, same middleware stack as `main.rs`.
pub fn build_test_app_with_policy(pool: PgPool, policy: AllocationPolicy) -> Router {
    let config = test_config(policy);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Application state for calling the engine directly.
pub fn test_state(pool: PgPool, policy: AllocationPolicy) -> AppState {
    AppState::new(pool, test_config(policy))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub async fn seed_donor(pool: &PgPool, email: &str) -> Donor {
    DonorRepo::create(
        pool,
        &CreateDonor {
            full_name: "Dana Donor".to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            institution: "Northside High".to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_item(pool: &PgPool, donor_id: DbId, name: &str) -> Item {
    ItemRepo::create(
        pool,
        &CreateItem {
            donor_id,
            item_name: name.to_string(),
            category: "Electronics".to_string(),
            condition: "Good".to_string(),
            description: None,
            estimated_value: Some(100.0),
            quantity: Some(1),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_admin(pool: &PgPool) -> Admin {
    AdminRepo::create(
        pool,
        &CreateAdmin {
            full_name: "Ada Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_pending_recipient(pool: &PgPool, phone: &str) -> Recipient {
    RecipientRepo::create(
        pool,
        &CreateRecipient {
            org_name: format!("Shelter {phone}"),
            org_type: Some("shelter".to_string()),
            contact_person: "Riley".to_string(),
            phone: phone.to_string(),
            email: None,
            address: "1 Main St".to_string(),
            application_letter: None,
        },
    )
    .await
    .unwrap()
}

/// A recipient verified by `admin_id`. `code` doubles as its phone number.
pub async fn seed_verified_recipient(pool: &PgPool, admin_id: DbId, code: &str) -> Recipient {
    let pending = seed_pending_recipient(pool, code).await;
    RecipientRepo::verify(pool, pending.id, admin_id, code)
        .await
        .unwrap()
        .unwrap()
}

/// Current availability status of an item, read straight from storage.
pub async fn item_status(pool: &PgPool, item_id: DbId) -> String {
    ItemRepo::find_by_id(pool, item_id)
        .await
        .unwrap()
        .unwrap()
        .availability_status
}

pub async fn distribution_count(pool: &PgPool, item_id: DbId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM distributions WHERE item_id = $1")
        .bind(item_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
