//! # inkpress-api
//!
//! HTTP API layer for Inkpress built on Axum.
//!
//! Content is addressed by path, passed as a `?path=` query parameter so
//! that slashes need no escaping. Provides the REST endpoints, middleware
//! (CORS, request logging, tracing, compression), the bearer-token
//! principal extractor, DTOs, and error mapping.

pub mod app;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
