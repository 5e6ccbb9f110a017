//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /login                      login
/// GET    /recipients?status=         list_recipients
/// POST   /recipients/{id}/approve    approve_recipient
/// POST   /recipients/{id}/reject     reject_recipient
/// GET    /requests?status=           list_requests
/// PUT    /requests/{id}              decide_request
/// GET    /items?status=              list_items
/// GET    /donors?status=             list_donors
/// GET    /distributions              list_distributions
/// GET    /{id}/profile               get_profile
/// PUT    /{id}/profile               update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/recipients", get(admin::list_recipients))
        .route("/recipients/{id}/approve", post(admin::approve_recipient))
        .route("/recipients/{id}/reject", post(admin::reject_recipient))
        .route("/requests", get(admin::list_requests))
        .route("/requests/{id}", put(admin::decide_request))
        .route("/items", get(admin::list_items))
        .route("/donors", get(admin::list_donors))
        .route("/distributions", get(admin::list_distributions))
        .route("/{id}/profile", get(admin::get_profile).put(admin::update_profile))
}
