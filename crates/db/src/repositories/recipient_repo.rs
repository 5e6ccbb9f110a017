//! Repository for the `recipients` table.

use donation_core::recipient::{
    VERIFICATION_PENDING, VERIFICATION_REJECTED, VERIFICATION_VERIFIED,
};
use donation_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipient::{CreateRecipient, Recipient, UpdateRecipient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, org_name, org_type, contact_person, phone, email, address, \
    application_letter, verification_status, access_code, rejection_reason, verified_by, \
    verified_at, registered_at";

/// Provides application, verification and profile operations for recipients.
pub struct RecipientRepo;

impl RecipientRepo {
    /// Insert a new pending application, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateRecipient) -> Result<Recipient, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipients
                (org_name, org_type, contact_person, phone, email, address, application_letter, verification_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipient>(&query)
            .bind(&input.org_name)
            .bind(&input.org_type)
            .bind(&input.contact_person)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.application_letter)
            .bind(VERIFICATION_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find a recipient by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipients WHERE id = $1");
        sqlx::query_as::<_, Recipient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a recipient by phone number.
    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Recipient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipients WHERE phone = $1");
        sqlx::query_as::<_, Recipient>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// Find a verified recipient by access code.
    pub async fn find_verified_by_access_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<Recipient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipients WHERE access_code = $1 AND verification_status = $2"
        );
        sqlx::query_as::<_, Recipient>(&query)
            .bind(code)
            .bind(VERIFICATION_VERIFIED)
            .fetch_optional(pool)
            .await
    }

    /// Whether any recipient already holds this access code.
    pub async fn access_code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM recipients WHERE access_code = $1)")
            .bind(code)
            .fetch_one(pool)
            .await
    }

    /// List recipients, optionally filtered by verification status, newest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<Recipient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipients
             WHERE ($1::TEXT IS NULL OR verification_status = $1)
             ORDER BY registered_at DESC, id DESC"
        );
        sqlx::query_as::<_, Recipient>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a recipient profile. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no recipient with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRecipient,
    ) -> Result<Option<Recipient>, sqlx::Error> {
        let query = format!(
            "UPDATE recipients SET
                org_name = COALESCE($2, org_name),
                org_type = COALESCE($3, org_type),
                contact_person = COALESCE($4, contact_person),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                address = COALESCE($7, address)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipient>(&query)
            .bind(id)
            .bind(&input.org_name)
            .bind(&input.org_type)
            .bind(&input.contact_person)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.address)
            .fetch_optional(pool)
            .await
    }

    /// Verify a pending recipient and assign its access code.
    ///
    /// Returns `None` if the recipient is missing or no longer pending.
    pub async fn verify(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
        access_code: &str,
    ) -> Result<Option<Recipient>, sqlx::Error> {
        let query = format!(
            "UPDATE recipients SET
                verification_status = $4,
                access_code = $3,
                verified_by = $2,
                verified_at = NOW()
             WHERE id = $1 AND verification_status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipient>(&query)
            .bind(id)
            .bind(admin_id)
            .bind(access_code)
            .bind(VERIFICATION_VERIFIED)
            .bind(VERIFICATION_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Reject a pending recipient with a reason.
    ///
    /// Returns `None` if the recipient is missing or no longer pending.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        admin_id: DbId,
        reason: &str,
    ) -> Result<Option<Recipient>, sqlx::Error> {
        let query = format!(
            "UPDATE recipients SET
                verification_status = $4,
                rejection_reason = $3,
                verified_by = $2,
                verified_at = NOW()
             WHERE id = $1 AND verification_status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipient>(&query)
            .bind(id)
            .bind(admin_id)
            .bind(reason)
            .bind(VERIFICATION_REJECTED)
            .bind(VERIFICATION_PENDING)
            .fetch_optional(pool)
            .await
    }
}
