//! Admin account models.

use donation_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `admins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Admin {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub status: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating an admin. `password_hash` is already hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdmin {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Admin profile changes. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdmin {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
