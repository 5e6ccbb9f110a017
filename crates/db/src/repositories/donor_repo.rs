//! Repository for the `donors` table.

use donation_core::accounts::ACCOUNT_ACTIVE;
use donation_core::types::DbId;
use sqlx::PgPool;

use crate::models::donor::{CreateDonor, Donor, DonorSummary, UpdateDonor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, full_name, email, phone, institution, password_hash, status, registered_at";

/// Provides CRUD operations for donors.
pub struct DonorRepo;

impl DonorRepo {
    /// Insert a new active donor, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDonor) -> Result<Donor, sqlx::Error> {
        let query = format!(
            "INSERT INTO donors (full_name, email, phone, institution, password_hash, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.institution)
            .bind(&input.password_hash)
            .bind(ACCOUNT_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Find a donor by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donors WHERE id = $1");
        sqlx::query_as::<_, Donor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a donor by (normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donors WHERE email = $1");
        sqlx::query_as::<_, Donor>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Update a donor profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no donor with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDonor,
    ) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!(
            "UPDATE donors SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                institution = COALESCE($4, institution)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.institution)
            .fetch_optional(pool)
            .await
    }

    /// List donors with their item counts, most recent donor activity first.
    ///
    /// Donors who never donated come last.
    pub async fn list_with_totals(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<DonorSummary>, sqlx::Error> {
        sqlx::query_as::<_, DonorSummary>(
            "SELECT d.id, d.full_name, d.email, d.phone, d.institution, d.status,
                    COUNT(i.id) AS total_items_donated,
                    MAX(i.donated_at) AS last_donation_at
             FROM donors d
             LEFT JOIN items i ON i.donor_id = d.id
             WHERE ($1::TEXT IS NULL OR d.status = $1)
             GROUP BY d.id
             ORDER BY MAX(i.donated_at) DESC NULLS LAST, d.id DESC",
        )
        .bind(status)
        .fetch_all(pool)
        .await
    }
}
