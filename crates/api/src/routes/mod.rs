pub mod admin;
pub mod donor;
pub mod health;
pub mod recipient;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /donors/register                                 register (POST)
/// /donors/login                                    login (POST)
/// /donors/{id}                                     get, update profile
/// /donors/{id}/items                               list donations, donate (GET, POST)
///
/// /recipients/register                             register (POST)
/// /recipients/login                                login by access code (POST)
/// /recipients/{id}                                 get, update profile
/// /recipients/{id}/requests                        request history (GET)
/// /recipients/{id}/distributions                   received items (GET)
///
/// /items/available                                 browse the pool (GET)
///
/// /requests                                        submit (POST)
/// /requests/{id}                                   cancel pending request (DELETE)
///
/// /distributions/{id}/rating                       rate a distribution (PUT)
///
/// /admin/login                                     login (POST)
/// /admin/recipients                                list by status (GET)
/// /admin/recipients/{id}/approve                   verify + issue access code (POST)
/// /admin/recipients/{id}/reject                    reject with reason (POST)
/// /admin/requests                                  list by status (GET)
/// /admin/requests/{id}                             decide (PUT)
/// /admin/items                                     list by status (GET)
/// /admin/donors                                    donors with item totals (GET)
/// /admin/distributions                             every distribution (GET)
/// /admin/{id}/profile                              get, update profile
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/donors", donor::router())
        .nest("/recipients", recipient::router())
        .nest("/admin", admin::router())
        .route("/items/available", get(handlers::item::list_available))
        .route("/requests", post(handlers::item_request::submit))
        .route("/requests/{id}", delete(handlers::item_request::cancel))
        .route("/distributions/{id}/rating", put(handlers::distribution::rate))
}
