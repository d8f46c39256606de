//! LMS content API server library.
//!
//! Exposes the core building blocks (config, state, error handling,
//! extractors, services, routes) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
pub mod upload;
