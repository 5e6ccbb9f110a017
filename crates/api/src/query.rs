//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?status=` filter used by the admin listing endpoints.
#[derive(Debug, Deserialize)]
pub struct StatusFilterParams {
    pub status: Option<String>,
}
