//! Repository for the `items` table.

use donation_core::allocation::{ItemStatus, ITEM_AVAILABLE};
use donation_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::item::{AvailableItem, CreateItem, Item};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, donor_id, item_name, category, condition, description, \
    estimated_value, quantity, availability_status, donated_at";

/// Provides CRUD and availability operations for donated items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item as `available`, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items
                (donor_id, item_name, category, condition, description, estimated_value, quantity, availability_status)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 1), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(input.donor_id)
            .bind(&input.item_name)
            .bind(&input.category)
            .bind(&input.condition)
            .bind(&input.description)
            .bind(input.estimated_value)
            .bind(input.quantity)
            .bind(ITEM_AVAILABLE)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a donor's items, newest donation first.
    pub async fn list_by_donor(pool: &PgPool, donor_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items WHERE donor_id = $1 ORDER BY donated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(donor_id)
            .fetch_all(pool)
            .await
    }

    /// List every item, optionally filtered by availability, newest first.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<ItemStatus>,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items
             WHERE ($1::TEXT IS NULL OR availability_status = $1)
             ORDER BY donated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// List items still in the pool, joined with the donor's name, newest first.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<AvailableItem>, sqlx::Error> {
        sqlx::query_as::<_, AvailableItem>(
            "SELECT i.id, i.item_name, i.category, i.condition, i.description,
                    i.estimated_value, i.quantity, d.full_name AS donor_name, i.donated_at
             FROM items i
             JOIN donors d ON d.id = i.donor_id
             WHERE i.availability_status = $1
             ORDER BY i.donated_at DESC, i.id DESC",
        )
        .bind(ITEM_AVAILABLE)
        .fetch_all(pool)
        .await
    }

    // ── Transactional ────────────────────────────────────────────────

    /// Current availability status, read on the caller's connection.
    pub async fn status_of(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT availability_status FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Move an item from `from` to `to` if and only if it is currently `from`.
    ///
    /// Returns `None` when the item does not exist or is in another status;
    /// callers re-read to tell the two apart. Two concurrent calls with the
    /// same `from` cannot both succeed.
    pub async fn transition_status(
        conn: &mut PgConnection,
        id: DbId,
        from: ItemStatus,
        to: ItemStatus,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE items SET availability_status = $3
             WHERE id = $1 AND availability_status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(&mut *conn)
            .await
    }
}
