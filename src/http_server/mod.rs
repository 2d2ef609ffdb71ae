//! # HTTP Server Module
//!
//! REST surface over the record store, built on axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/elements` - List and create emission records
//! - `/elements/:id` - Fetch, update, and delete one record

pub mod config;
pub mod element_routes;
pub mod errors;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
