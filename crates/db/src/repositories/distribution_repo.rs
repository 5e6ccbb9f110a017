//! Repository for the `distributions` table.

use donation_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::distribution::{
    AdminDistributionRow, CreateDistribution, Distribution, RecipientDistribution,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item_id, recipient_id, request_id, quantity, notes, \
    delivery_method, delivered_at, satisfaction_rating, recipient_feedback, distributed_at";

/// Provides create, rating and listing operations for distributions.
pub struct DistributionRepo;

impl DistributionRepo {
    /// Insert a distribution inside the caller's transaction.
    ///
    /// Fails with a `uq_distributions_item_id` violation if the item
    /// already has one.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateDistribution,
    ) -> Result<Distribution, sqlx::Error> {
        let query = format!(
            "INSERT INTO distributions (item_id, recipient_id, request_id, quantity, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Distribution>(&query)
            .bind(input.item_id)
            .bind(input.recipient_id)
            .bind(input.request_id)
            .bind(input.quantity)
            .bind(&input.notes)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find a distribution by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Distribution>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM distributions WHERE id = $1");
        sqlx::query_as::<_, Distribution>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the rating and feedback. Returns `None` if no such distribution.
    pub async fn rate(
        pool: &PgPool,
        id: DbId,
        rating: i16,
        feedback: Option<&str>,
    ) -> Result<Option<Distribution>, sqlx::Error> {
        let query = format!(
            "UPDATE distributions SET satisfaction_rating = $2, recipient_feedback = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Distribution>(&query)
            .bind(id)
            .bind(rating)
            .bind(feedback)
            .fetch_optional(pool)
            .await
    }

    /// List a recipient's distributions joined with the items, newest first.
    pub async fn list_by_recipient(
        pool: &PgPool,
        recipient_id: DbId,
    ) -> Result<Vec<RecipientDistribution>, sqlx::Error> {
        sqlx::query_as::<_, RecipientDistribution>(
            "SELECT d.id, d.item_id, d.quantity, d.notes, d.satisfaction_rating,
                    d.recipient_feedback, d.distributed_at,
                    i.item_name, i.category, i.condition, i.estimated_value, i.donor_id
             FROM distributions d
             JOIN items i ON i.id = d.item_id
             WHERE d.recipient_id = $1
             ORDER BY d.distributed_at DESC, d.id DESC",
        )
        .bind(recipient_id)
        .fetch_all(pool)
        .await
    }

    /// Every distribution with recipient and item names, newest first.
    pub async fn list_for_admin(pool: &PgPool) -> Result<Vec<AdminDistributionRow>, sqlx::Error> {
        sqlx::query_as::<_, AdminDistributionRow>(
            "SELECT d.id, d.item_id, i.item_name, i.category, d.recipient_id, r.org_name,
                    d.quantity, d.notes, d.satisfaction_rating, d.recipient_feedback,
                    d.distributed_at
             FROM distributions d
             JOIN recipients r ON r.id = d.recipient_id
             JOIN items i ON i.id = d.item_id
             ORDER BY d.distributed_at DESC, d.id DESC",
        )
        .fetch_all(pool)
        .await
    }
}
