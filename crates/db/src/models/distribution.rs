//! Distribution (hand-over) models.

use donation_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `distributions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Distribution {
    pub id: DbId,
    pub item_id: DbId,
    pub recipient_id: DbId,
    pub request_id: Option<DbId>,
    pub quantity: i32,
    pub notes: Option<String>,
    pub delivery_method: Option<String>,
    pub delivered_at: Option<Timestamp>,
    pub satisfaction_rating: Option<i16>,
    pub recipient_feedback: Option<String>,
    pub distributed_at: Timestamp,
}

/// DTO for recording a distribution.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDistribution {
    pub item_id: DbId,
    pub recipient_id: DbId,
    pub request_id: Option<DbId>,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// A recipient's distribution joined with the item received.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipientDistribution {
    pub id: DbId,
    pub item_id: DbId,
    pub quantity: i32,
    pub notes: Option<String>,
    pub satisfaction_rating: Option<i16>,
    pub recipient_feedback: Option<String>,
    pub distributed_at: Timestamp,
    pub item_name: String,
    pub category: String,
    pub condition: String,
    pub estimated_value: f64,
    pub donor_id: DbId,
}

/// Distribution row for the admin overview, joined with recipient and item.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminDistributionRow {
    pub id: DbId,
    pub item_id: DbId,
    pub item_name: String,
    pub category: String,
    pub recipient_id: DbId,
    pub org_name: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub satisfaction_rating: Option<i16>,
    pub recipient_feedback: Option<String>,
    pub distributed_at: Timestamp,
}
