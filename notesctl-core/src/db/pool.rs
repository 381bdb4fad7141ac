//! PgPool construction
//!
//! The pool is the only shared resource: it queues callers when every
//! connection is busy, so the store needs no locking of its own.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Pool size used when nothing else is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect with `DEFAULT_MAX_CONNECTIONS`.
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/notes").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with an explicit connection limit.
///
/// # Errors
///
/// Returns `sqlx::Error::Configuration` for a zero connection limit, or
/// the driver error if the first connection cannot be opened.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    if max_connections == 0 {
        return Err(sqlx::Error::Configuration(
            "max_connections must be at least 1".into(),
        ));
    }

    tracing::debug!(max_connections, "opening notes pool");

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_connections_is_a_configuration_error() {
        // Rejected before any connection attempt, so no server is needed
        let err = create_pool_with_options("postgres://127.0.0.1:1/notes", 0)
            .await
            .unwrap_err();

        assert!(matches!(err, sqlx::Error::Configuration(_)), "{err}");
        assert!(err.to_string().contains("max_connections must be at least 1"));
    }

    // DATABASE_URL=postgres://... cargo test -p notesctl-core -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_answers_queries() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let (one,): (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(one, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_respects_connection_limit() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 2)
            .await
            .expect("pool creation failed");

        assert_eq!(pool.options().get_max_connections(), 2);
    }
}
