//! Recipient verification statuses and access-code generation.
//!
//! Recipients register as `pending`. An admin either verifies them, which
//! assigns an access code used for login, or rejects them with a reason.
//! Only verified recipients may place item requests.

use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Verification status constants
// ---------------------------------------------------------------------------

/// Application submitted, awaiting admin review.
pub const VERIFICATION_PENDING: &str = "pending";
/// Approved by an admin; has an access code.
pub const VERIFICATION_VERIFIED: &str = "verified";
/// Application refused.
pub const VERIFICATION_REJECTED: &str = "rejected";

/// All valid verification statuses.
pub const VALID_VERIFICATION_STATUSES: &[&str] = &[
    VERIFICATION_PENDING,
    VERIFICATION_VERIFIED,
    VERIFICATION_REJECTED,
];

/// Listing filter value that matches every verification status.
pub const FILTER_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Access codes
// ---------------------------------------------------------------------------

/// Prefix of every recipient access code.
pub const ACCESS_CODE_PREFIX: &str = "RCP";

/// Number of generation attempts before giving up on a unique code.
pub const MAX_ACCESS_CODE_ATTEMPTS: usize = 5;

/// Generate an access code: `RCP` followed by six digits.
pub fn generate_access_code() -> String {
    let digits: u32 = rand::rng().random_range(100_000..1_000_000);
    format!("{ACCESS_CODE_PREFIX}{digits}")
}

/// Check the shape of an access code before hitting the database.
pub fn is_well_formed_access_code(code: &str) -> bool {
    code.strip_prefix(ACCESS_CODE_PREFIX)
        .is_some_and(|digits| digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_digit()))
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Resolve a listing filter into a status, `None` meaning every status.
///
/// Missing filters default to `pending`, the admin review queue.
pub fn resolve_status_filter(filter: Option<&str>) -> Result<Option<&'static str>, CoreError> {
    match filter.unwrap_or(VERIFICATION_PENDING) {
        FILTER_ALL => Ok(None),
        s => VALID_VERIFICATION_STATUSES
            .iter()
            .find(|v| **v == s)
            .map(|v| Some(*v))
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!(
                    "Invalid verification status '{s}'. Must be one of: {}, {FILTER_ALL}",
                    VALID_VERIFICATION_STATUSES.join(", ")
                ))
            }),
    }
}

/// Validate that a recipient application can still be decided.
pub fn validate_pending(current: &str) -> Result<(), CoreError> {
    if current == VERIFICATION_PENDING {
        Ok(())
    } else {
        Err(CoreError::InvalidState(
            "Recipient is not in pending status".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..100 {
            let code = generate_access_code();
            assert!(is_well_formed_access_code(&code), "bad code {code}");
        }
    }

    #[test]
    fn malformed_codes_rejected() {
        assert!(!is_well_formed_access_code("RCP12345"));
        assert!(!is_well_formed_access_code("ABC123456"));
        assert!(!is_well_formed_access_code("RCP12a456"));
        assert!(!is_well_formed_access_code(""));
    }

    #[test]
    fn status_filter_defaults_to_pending() {
        assert_eq!(resolve_status_filter(None).unwrap(), Some(VERIFICATION_PENDING));
    }

    #[test]
    fn status_filter_all_matches_everything() {
        assert_eq!(resolve_status_filter(Some("all")).unwrap(), None);
    }

    #[test]
    fn status_filter_rejects_unknown() {
        assert_matches!(
            resolve_status_filter(Some("banned")),
            Err(CoreError::InvalidArgument(_))
        );
    }

    #[test]
    fn only_pending_applications_can_be_decided() {
        assert!(validate_pending(VERIFICATION_PENDING).is_ok());
        assert_matches!(
            validate_pending(VERIFICATION_VERIFIED),
            Err(CoreError::InvalidState(_))
        );
    }
}
