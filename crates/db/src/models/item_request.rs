//! Item request models.

use donation_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `item_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemRequest {
    pub id: DbId,
    pub recipient_id: DbId,
    pub item_id: DbId,
    pub quantity_requested: i32,
    pub request_reason: Option<String>,
    pub request_status: String,
    pub decided_by: Option<DbId>,
    pub decision_reason: Option<String>,
    pub admin_notes: Option<String>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for inserting a request with an already-resolved status and quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub recipient_id: DbId,
    pub item_id: DbId,
    pub quantity_requested: i32,
    pub request_reason: Option<String>,
    pub request_status: String,
}

/// Admin metadata written alongside a decision.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDecision {
    pub request_status: String,
    pub decided_by: DbId,
    pub decision_reason: Option<String>,
    pub admin_notes: Option<String>,
}

/// A recipient's request joined with the requested item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipientRequest {
    pub id: DbId,
    pub item_id: DbId,
    pub quantity_requested: i32,
    pub request_reason: Option<String>,
    pub request_status: String,
    pub decision_reason: Option<String>,
    pub created_at: Timestamp,
    pub item_name: String,
    pub category: String,
    pub estimated_value: f64,
}

/// A request as shown in the admin queue, joined with recipient and item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminRequestRow {
    pub id: DbId,
    pub recipient_id: DbId,
    pub org_name: String,
    pub item_id: DbId,
    pub item_name: String,
    pub category: String,
    pub estimated_value: f64,
    pub quantity_requested: i32,
    pub request_reason: Option<String>,
    pub request_status: String,
    pub created_at: Timestamp,
}
