//! Startup seeding of the first admin account.

use donation_core::accounts::normalize_email;
use donation_db::models::admin::CreateAdmin;
use donation_db::repositories::AdminRepo;
use sqlx::PgPool;

use crate::auth::password::prepare_password;
use crate::config::ServerConfig;
use crate::error::AppResult;

/// Create the configured bootstrap admin unless an admin with that email exists.
///
/// Returns `true` if an account was created.
pub async fn ensure_bootstrap_admin(pool: &PgPool, config: &ServerConfig) -> AppResult<bool> {
    let Some(seed) = &config.bootstrap_admin else {
        return Ok(false);
    };

    let email = normalize_email(&seed.email);
    if AdminRepo::find_by_email(pool, &email).await?.is_some() {
        tracing::debug!(%email, "Bootstrap admin already present");
        return Ok(false);
    }

    let password_hash = prepare_password(&seed.password, config.min_password_length)?;
    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            full_name: seed.full_name.clone(),
            email,
            password_hash,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, "Bootstrap admin created");
    Ok(true)
}
