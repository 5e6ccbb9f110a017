//! HTTP-level tests for donor registration, login, and donations.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

fn registration(email: &str) -> serde_json::Value {
    json!({
        "full_name": "Dana Donor",
        "email": email,
        "phone": "555-0100",
        "institution": "Northside High",
        "password": TEST_PASSWORD,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_donor_returns_201_without_hash(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/donors/register", registration("Dana@Example.com")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "dana@example.com");
    assert_eq!(json["data"]["status"], "active");
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_returns_409(pool: PgPool) {
    common::seed_donor(&pool, "dana@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/donors/register", registration("dana@example.com")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_short_password_and_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let mut body = registration("dana@example.com");
    body["password"] = json!("short");
    let response = post_json(app, "/api/v1/donors/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_ARGUMENT");

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/donors/register", registration("not-an-email")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_by_email_or_id(pool: PgPool) {
    let donor = common::seed_donor(&pool, "dana@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/donors/login",
        json!({"identifier": "DANA@example.com", "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], donor.id);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/donors/login",
        json!({"identifier": donor.id.to_string(), "password": TEST_PASSWORD}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/donors/login",
        json!({"identifier": "dana@example.com", "password": "wrong-password"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_profile_keeps_unset_fields(pool: PgPool) {
    let donor = common::seed_donor(&pool, "dana@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/donors/{}", donor.id),
        json!({"institution": "Eastside College"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["institution"], "Eastside College");
    assert_eq!(json["data"]["full_name"], "Dana Donor");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/donors/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_donate_then_list_and_browse(pool: PgPool) {
    let donor = common::seed_donor(&pool, "dana@example.com").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/donors/{}/items", donor.id),
        json!({
            "item_name": "Graphing calculator",
            "category": "Electronics",
            "condition": "Like new",
            "estimated_value": 80.5,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["availability_status"], "available");
    assert_eq!(json["data"]["quantity"], 1);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/donors/{}/items", donor.id)).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/items/available").await).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["donor_name"], "Dana Donor");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_donate_rejects_negative_value(pool: PgPool) {
    let donor = common::seed_donor(&pool, "dana@example.com").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/donors/{}/items", donor.id),
        json!({
            "item_name": "Desk",
            "category": "Furniture",
            "condition": "Used",
            "estimated_value": -1.0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
