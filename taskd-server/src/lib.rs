//! taskd-server: HTTP API for task management
//!
//! A small CRUD service over a single `tasks` table in PostgreSQL:
//! validated payloads in, parameterized statements against a bounded
//! connection pool, storage outcomes mapped back to protocol results.

pub mod db;
pub mod http;
pub mod models;
