//! Notes store - CRUD over the `notes` table
//!
//! Each call is exactly one statement:
//! - create: positional INSERT ... RETURNING id
//! - update/delete: RETURNING id to confirm a row matched
//! - list: unordered SELECT, mapped row by row

use std::fmt;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Action, NotesError, Result};
use crate::id::{IdGenerator, NanoIdGenerator};
use crate::model::{Note, NoteRow};

/// Notes repository over a shared connection pool
#[derive(Clone)]
pub struct NotesStore {
    pool: PgPool,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for NotesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotesStore")
            .field("pool_size", &self.pool.size())
            .finish_non_exhaustive()
    }
}

impl NotesStore {
    /// Store with random 16-char ids and the system clock.
    pub fn new(pool: PgPool) -> Self {
        Self::with_collaborators(pool, Arc::new(NanoIdGenerator::new()), Arc::new(SystemClock))
    }

    /// Store with caller-supplied id generator and clock.
    pub fn with_collaborators(
        pool: PgPool,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { pool, ids, clock }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a new note and return its id.
    ///
    /// `created_at` and `updated_at` share one clock reading. A missing
    /// `RETURNING id` is reported as an invariant violation, never as
    /// not-found.
    #[instrument(skip_all, fields(tags = tags.len()))]
    pub async fn create(&self, title: &str, body: &str, tags: &[String]) -> Result<String> {
        let id = self.ids.generate();
        let created_at = self.clock.now();
        let updated_at = created_at;

        let returned: Option<String> = sqlx::query_scalar(
            "INSERT INTO notes VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&id)
        .bind(title)
        .bind(body)
        .bind(tags)
        .bind(created_at)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        match returned {
            Some(id) if !id.is_empty() => {
                debug!(%id, "note created");
                Ok(id)
            }
            _ => {
                warn!(%id, "insert returned no id");
                Err(NotesError::invariant("note could not be added"))
            }
        }
    }

    /// Every stored note, in whatever order the database returns them.
    #[instrument(skip_all)]
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        let rows: Vec<NoteRow> = sqlx::query_as("SELECT * FROM notes")
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "listed notes");
        Ok(rows.into_iter().map(Note::from).collect())
    }

    #[instrument(skip_all, fields(id = %id))]
    pub async fn get_by_id(&self, id: &str) -> Result<Note> {
        let row: Option<NoteRow> = sqlx::query_as("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Note::from).ok_or_else(|| {
            warn!("note not found");
            NotesError::note_not_found(id, Action::Get)
        })
    }

    /// Overwrite title, body and tags and refresh `updated_at`.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn update_by_id(
        &self,
        id: &str,
        title: &str,
        body: &str,
        tags: &[String],
    ) -> Result<()> {
        let updated_at = self.clock.now();

        let returned: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE notes
            SET title = $1, body = $2, tags = $3, updated_at = $4
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(body)
        .bind(tags)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if returned.is_none() {
            warn!("update matched no note");
            return Err(NotesError::note_not_found(id, Action::Update));
        }

        debug!("note updated");
        Ok(())
    }

    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let returned: Option<String> =
            sqlx::query_scalar("DELETE FROM notes WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        if returned.is_none() {
            warn!("delete matched no note");
            return Err(NotesError::note_not_found(id, Action::Delete));
        }

        debug!("note deleted");
        Ok(())
    }
}
