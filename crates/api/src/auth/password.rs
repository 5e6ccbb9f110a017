//! Argon2id password hashing, verification, and strength validation.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use donation_core::error::CoreError;

use crate::error::AppError;

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validate that a password meets minimum strength requirements.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::InvalidArgument(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

/// Validate and hash a new password for storage.
pub fn prepare_password(password: &str, min_length: usize) -> Result<String, AppError> {
    validate_password_strength(password, min_length)?;
    hash_password(password).map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// Check a login attempt, treating a malformed stored hash as a mismatch.
pub fn password_matches(password: &str, hash: &str) -> bool {
    match verify_password(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");

        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_password_too_short() {
        let err = validate_password_strength("short", 8).unwrap_err();
        assert!(
            err.to_string().contains("at least 8 characters"),
            "error message should state the minimum length"
        );
    }

    #[test]
    fn test_garbage_hash_never_matches() {
        assert!(!password_matches("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_prepare_password_hashes_valid_input() {
        let hash = prepare_password("long-enough-secret", 8).expect("should hash");
        assert!(password_matches("long-enough-secret", &hash));
    }
}
