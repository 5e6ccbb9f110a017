//! Donor account models.

use donation_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `donors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donor {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub status: String,
    pub registered_at: Timestamp,
}

/// DTO for registering a donor. `password_hash` is already hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDonor {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    pub password_hash: String,
}

/// DTO for updating a donor profile. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDonor {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub institution: Option<String>,
}

/// Donor row for the admin overview, with donation totals.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonorSummary {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    pub status: String,
    pub total_items_donated: i64,
    pub last_donation_at: Option<Timestamp>,
}
