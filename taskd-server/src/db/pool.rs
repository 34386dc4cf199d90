//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is constructed
//! once at startup and injected wherever a handle is needed; there is no
//! module-level singleton. Every statement runs with autocommit semantics
//! (no explicit transactions anywhere in this service), and sqlx's scoped
//! acquisition returns connections to the pool on every exit path, including
//! request cancellation.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::config::DbConfig;

/// Create the PostgreSQL connection pool.
///
/// Bounded by `min_connections`/`max_connections` from the config. On
/// failure the error propagates to the caller: the process must not start
/// accepting requests without a working pool.
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database.
    // Run with: DB_USER=... DB_PASSWORD=... DB_NAME=... \
    //   cargo test -p taskd-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let config = DbConfig::from_env().expect("database env vars required");
        let pool = create_pool(&config).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let config = DbConfig::from_env().expect("database env vars required");
        let pool = create_pool(&config).await.expect("pool creation failed");

        // More tasks than the pool ceiling; acquisition must queue, not fail
        let handles: Vec<_> = (0..20)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn close_drains_pool() {
        let config = DbConfig::from_env().expect("database env vars required");
        let pool = create_pool(&config).await.expect("pool creation failed");

        pool.close().await;
        assert!(pool.is_closed());
    }
}
