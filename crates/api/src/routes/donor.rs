//! Route definitions for the `/donors` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::donor;
use crate::state::AppState;

/// Routes mounted at `/donors`.
///
/// ```text
/// POST   /register        register
/// POST   /login           login
/// GET    /{id}            get_profile
/// PUT    /{id}            update_profile
/// GET    /{id}/items      list_donations
/// POST   /{id}/items      donate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(donor::register))
        .route("/login", post(donor::login))
        .route("/{id}", get(donor::get_profile).put(donor::update_profile))
        .route("/{id}/items", get(donor::list_donations).post(donor::donate))
}
