//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Join rows used by listing endpoints, where the table has any

pub mod admin;
pub mod distribution;
pub mod donor;
pub mod item;
pub mod item_request;
pub mod recipient;
