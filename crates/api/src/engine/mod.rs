//! Item allocation engine.
//!
//! Owns the item / request / distribution lifecycle and keeps the three
//! tables consistent under the configured [`AllocationPolicy`].
//!
//! [`AllocationPolicy`]: donation_core::allocation::AllocationPolicy

pub mod allocation;

pub use allocation::AllocationEngine;
