//! Repository for the `item_requests` table.

use donation_core::allocation::{RequestStatus, REQUEST_PENDING};
use donation_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::item_request::{
    AdminRequestRow, CreateItemRequest, ItemRequest, RecipientRequest, RecordDecision,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, recipient_id, item_id, quantity_requested, request_reason, \
    request_status, decided_by, decision_reason, admin_notes, decided_at, created_at";

/// Provides read and lifecycle operations for item requests.
pub struct ItemRequestRepo;

impl ItemRequestRepo {
    /// Find a request by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ItemRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM item_requests WHERE id = $1");
        sqlx::query_as::<_, ItemRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a recipient's requests joined with their items, newest first.
    pub async fn list_by_recipient(
        pool: &PgPool,
        recipient_id: DbId,
    ) -> Result<Vec<RecipientRequest>, sqlx::Error> {
        sqlx::query_as::<_, RecipientRequest>(
            "SELECT r.id, r.item_id, r.quantity_requested, r.request_reason, r.request_status,
                    r.decision_reason, r.created_at,
                    i.item_name, i.category, i.estimated_value
             FROM item_requests r
             JOIN items i ON i.id = r.item_id
             WHERE r.recipient_id = $1
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(recipient_id)
        .fetch_all(pool)
        .await
    }

    /// List requests for the admin queue, optionally filtered by status, newest first.
    pub async fn list_for_admin(
        pool: &PgPool,
        status: Option<RequestStatus>,
    ) -> Result<Vec<AdminRequestRow>, sqlx::Error> {
        sqlx::query_as::<_, AdminRequestRow>(
            "SELECT r.id, r.recipient_id, rc.org_name, r.item_id, i.item_name, i.category,
                    i.estimated_value, r.quantity_requested, r.request_reason, r.request_status,
                    r.created_at
             FROM item_requests r
             JOIN recipients rc ON rc.id = r.recipient_id
             JOIN items i ON i.id = r.item_id
             WHERE ($1::TEXT IS NULL OR r.request_status = $1)
             ORDER BY r.created_at DESC, r.id DESC",
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(pool)
        .await
    }

    // ── Transactional ────────────────────────────────────────────────

    /// Insert a request with its resolved status and quantity.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateItemRequest,
    ) -> Result<ItemRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO item_requests
                (recipient_id, item_id, quantity_requested, request_reason, request_status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemRequest>(&query)
            .bind(input.recipient_id)
            .bind(input.item_id)
            .bind(input.quantity_requested)
            .bind(&input.request_reason)
            .bind(&input.request_status)
            .fetch_one(&mut *conn)
            .await
    }

    /// Apply a decision if the request is still in `expected` status.
    ///
    /// Returns `None` if the request is gone or its status changed since it
    /// was read.
    pub async fn record_decision(
        conn: &mut PgConnection,
        id: DbId,
        expected: RequestStatus,
        input: &RecordDecision,
    ) -> Result<Option<ItemRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE item_requests SET
                request_status = $3,
                decided_by = $4,
                decision_reason = COALESCE($5, decision_reason),
                admin_notes = COALESCE($6, admin_notes),
                decided_at = NOW()
             WHERE id = $1 AND request_status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemRequest>(&query)
            .bind(id)
            .bind(expected.as_str())
            .bind(&input.request_status)
            .bind(input.decided_by)
            .bind(&input.decision_reason)
            .bind(&input.admin_notes)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Delete a request only while it is pending, returning the deleted row.
    pub async fn delete_pending(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ItemRequest>, sqlx::Error> {
        let query = format!(
            "DELETE FROM item_requests
             WHERE id = $1 AND request_status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ItemRequest>(&query)
            .bind(id)
            .bind(REQUEST_PENDING)
            .fetch_optional(&mut *conn)
            .await
    }
}
