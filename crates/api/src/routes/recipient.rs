//! Route definitions for the `/recipients` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recipient;
use crate::state::AppState;

/// Routes mounted at `/recipients`.
///
/// ```text
/// POST   /register              register
/// POST   /login                 login
/// GET    /{id}                  get_profile
/// PUT    /{id}                  update_profile
/// GET    /{id}/requests         list_requests
/// GET    /{id}/distributions    list_distributions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(recipient::register))
        .route("/login", post(recipient::login))
        .route(
            "/{id}",
            get(recipient::get_profile).put(recipient::update_profile),
        )
        .route("/{id}/requests", get(recipient::list_requests))
        .route("/{id}/distributions", get(recipient::list_distributions))
}
