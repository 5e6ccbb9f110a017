//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Methods that take
//! `&mut PgConnection` instead are meant to run inside a caller-owned
//! transaction.

pub mod admin_repo;
pub mod distribution_repo;
pub mod donor_repo;
pub mod item_repo;
pub mod item_request_repo;
pub mod recipient_repo;

pub use admin_repo::AdminRepo;
pub use distribution_repo::DistributionRepo;
pub use donor_repo::DonorRepo;
pub use item_repo::ItemRepo;
pub use item_request_repo::ItemRequestRepo;
pub use recipient_repo::RecipientRepo;
