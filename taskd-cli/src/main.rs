//! taskd - HTTP server for task management
//!
//! Loads datastore configuration from the environment (and an optional
//! `.env` file), establishes the connection pool, and serves the task API
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use taskd_server::db::{create_pool, DbConfig};
use taskd_server::http::{run_server, ServerConfig};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(name = "taskd", about = "Task management HTTP API", version)]
struct Args {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables win either way
    dotenvy::dotenv().ok();

    let args = Args::parse();
    tracing_setup::init_tracing(args.debug)?;

    // Missing credentials are fatal here, before any request is accepted
    let db_config = DbConfig::from_env().context("Invalid database configuration")?;

    tracing::info!(
        host = %db_config.host,
        port = db_config.port,
        database = %db_config.database,
        "Connecting to database"
    );
    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;
    tracing::info!("Database pool initialized");

    let config = ServerConfig { bind_addr: args.bind };
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
