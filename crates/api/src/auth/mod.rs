//! Credential primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//!
//! Callers are identified by the ids they pass; there are no sessions.

pub mod password;
