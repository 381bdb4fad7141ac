//! Schema for the `notes` table
//!
//! Column order matches the positional `INSERT INTO notes VALUES (...)`
//! used by the store, so it must not be reordered.

use sqlx::PgPool;

const CREATE_NOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS notes (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        body TEXT NOT NULL,
        tags TEXT[] NOT NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
"#;

/// Create the notes table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring notes schema...");

    sqlx::query(CREATE_NOTES_TABLE).execute(pool).await?;

    tracing::info!("Notes schema ready");
    Ok(())
}
