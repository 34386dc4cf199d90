//! Database layer - configuration, connection pool, and repositories
//!
//! # Design Principles
//!
//! - One bounded pool per process, injected explicitly - no global state
//! - Parameterized statements only - no string interpolation of values
//! - Autocommit per statement - this service has no multi-statement
//!   transactions, and check-then-act pairs are accepted as racy

pub mod config;
pub mod pool;
pub mod repos;

pub use config::{ConfigError, DbConfig};
pub use pool::create_pool;
pub use repos::{DbError, TaskRepo};
