//! Repository for the `admins` table.

use donation_core::accounts::ACCOUNT_ACTIVE;
use donation_core::types::DbId;
use sqlx::PgPool;

use crate::models::admin::{Admin, CreateAdmin, UpdateAdmin};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, password_hash, status, last_login_at, created_at";

/// Provides account operations for admins.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new active admin, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAdmin) -> Result<Admin, sqlx::Error> {
        let query = format!(
            "INSERT INTO admins (full_name, email, password_hash, status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(ACCOUNT_ACTIVE)
            .fetch_one(pool)
            .await
    }

    /// Find an admin by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin by (normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE email = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Stamp a successful login.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admins SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Update an admin profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no admin with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdmin,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!(
            "UPDATE admins SET
                full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_optional(pool)
            .await
    }
}
