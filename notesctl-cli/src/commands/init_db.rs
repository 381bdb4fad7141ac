use anyhow::{Context, Result};
use notesctl_core::db::ensure_schema;
use notesctl_core::NotesStore;

pub async fn run_init_db(store: &NotesStore) -> Result<()> {
    ensure_schema(store.pool())
        .await
        .context("Failed to create notes table")?;
    println!("notes table ready");
    Ok(())
}
