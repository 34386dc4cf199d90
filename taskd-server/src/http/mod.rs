//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown (Ctrl+C / SIGTERM), pool drained on exit
//! - JSON error responses

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{run_server, AppState, ServerConfig};
