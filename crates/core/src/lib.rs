//! Domain rules for the donation platform.
//!
//! Pure logic only: status vocabularies, the allocation policy and its
//! transition tables, input validators, and credential helpers that need no
//! database or HTTP context.

pub mod accounts;
pub mod allocation;
pub mod error;
pub mod recipient;
pub mod types;
