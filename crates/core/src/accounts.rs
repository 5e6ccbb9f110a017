//! Donor and admin account rules.

use crate::error::CoreError;
use crate::types::DbId;

/// Account may log in.
pub const ACCOUNT_ACTIVE: &str = "active";
/// Account is disabled.
pub const ACCOUNT_INACTIVE: &str = "inactive";

/// What a donor typed into the login identifier field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    Email(String),
    Id(DbId),
}

impl LoginIdentifier {
    /// Numeric identifiers are donor ids, everything else is an email.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<DbId>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Email(normalize_email(trimmed)),
        }
    }
}

/// Emails are stored and compared lowercase without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Map a `?status=` filter on account listings to a stored status.
///
/// Absent, blank, or `all` means no filter.
pub fn resolve_account_status_filter(
    filter: Option<&str>,
) -> Result<Option<&'static str>, CoreError> {
    match filter.map(str::trim).unwrap_or("") {
        "" | "all" => Ok(None),
        ACCOUNT_ACTIVE => Ok(Some(ACCOUNT_ACTIVE)),
        ACCOUNT_INACTIVE => Ok(Some(ACCOUNT_INACTIVE)),
        other => Err(CoreError::InvalidArgument(format!("Unknown account status '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_identifier_is_an_id() {
        assert_eq!(LoginIdentifier::parse(" 42 "), LoginIdentifier::Id(42));
    }

    #[test]
    fn other_identifiers_are_normalized_emails() {
        assert_eq!(
            LoginIdentifier::parse("Jane@Example.org "),
            LoginIdentifier::Email("jane@example.org".into())
        );
    }

    #[test]
    fn account_status_filter_accepts_known_values() {
        assert_eq!(resolve_account_status_filter(None).unwrap(), None);
        assert_eq!(resolve_account_status_filter(Some(" all ")).unwrap(), None);
        assert_eq!(
            resolve_account_status_filter(Some("inactive")).unwrap(),
            Some(ACCOUNT_INACTIVE)
        );
    }

    #[test]
    fn account_status_filter_rejects_unknown_values() {
        let err = resolve_account_status_filter(Some("banned")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }
}
