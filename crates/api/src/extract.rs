//! Request extractors whose rejections use the API error body.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON request body. A malformed body, a missing field, or a value of the
/// wrong type is rejected as `INVALID_ARGUMENT` (400) instead of axum's
/// plain-text 4xx.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
