//! Donated item models.

use donation_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub donor_id: DbId,
    pub item_name: String,
    pub category: String,
    pub condition: String,
    pub description: Option<String>,
    pub estimated_value: f64,
    pub quantity: i32,
    pub availability_status: String,
    pub donated_at: Timestamp,
}

/// DTO for donating an item. Defaults: value 0, quantity 1.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateItem {
    pub donor_id: DbId,
    pub item_name: String,
    pub category: String,
    pub condition: String,
    pub description: Option<String>,
    pub estimated_value: Option<f64>,
    pub quantity: Option<i32>,
}

/// An available item joined with its donor's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AvailableItem {
    pub id: DbId,
    pub item_name: String,
    pub category: String,
    pub condition: String,
    pub description: Option<String>,
    pub estimated_value: f64,
    pub quantity: i32,
    pub donor_name: String,
    pub donated_at: Timestamp,
}
