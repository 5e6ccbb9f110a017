//! Donation platform API server library.
//!
//! Exposes the core building blocks (config, state, error handling, the
//! allocation engine, routes) so integration tests and the binary entrypoint
//! can both access them.

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
