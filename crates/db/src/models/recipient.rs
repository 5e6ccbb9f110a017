//! Recipient organization models.

use donation_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recipients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipient {
    pub id: DbId,
    pub org_name: String,
    pub org_type: Option<String>,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub application_letter: Option<String>,
    pub verification_status: String,
    pub access_code: Option<String>,
    pub rejection_reason: Option<String>,
    pub verified_by: Option<DbId>,
    pub verified_at: Option<Timestamp>,
    pub registered_at: Timestamp,
}

/// DTO for a new recipient application.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipient {
    pub org_name: String,
    pub org_type: Option<String>,
    pub contact_person: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub application_letter: Option<String>,
}

/// DTO for updating a recipient profile. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipient {
    pub org_name: Option<String>,
    pub org_type: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}
