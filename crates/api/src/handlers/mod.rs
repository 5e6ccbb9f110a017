//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Account and catalogue handlers delegate to the repositories in
//! `donation_db`; anything that moves an item between statuses goes through
//! the [`AllocationEngine`](crate::engine::AllocationEngine).

pub mod admin;
pub mod distribution;
pub mod donor;
pub mod item;
pub mod item_request;
pub mod recipient;
