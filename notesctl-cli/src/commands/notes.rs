//! Note commands: add, list, show, edit, rm
//!
//! ```bash
//! notesctl add --title Shopping --body "Buy milk" --tag errand
//! notesctl list --format json | jq '.[] | {id, title}'
//! notesctl edit V1StGXR8_Z5jdHi6 --title "Shopping v2" --body "Buy milk and eggs" --tag errand --tag food
//! notesctl rm V1StGXR8_Z5jdHi6
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use notesctl_core::{Note, NotesStore};

// ============================================================================
// Output Format (shared)
// ============================================================================

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}

// ============================================================================
// Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Note title
    #[arg(long)]
    pub title: String,

    /// Note body
    #[arg(long)]
    pub body: String,

    /// Tag to attach (repeatable, order is kept)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID
    pub id: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID
    pub id: String,

    /// Replacement title
    #[arg(long)]
    pub title: String,

    /// Replacement body
    #[arg(long)]
    pub body: String,

    /// Replacement tag (repeatable, replaces all existing tags)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Note ID
    pub id: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn run_add(store: &NotesStore, args: AddArgs) -> Result<()> {
    let id = store.create(&args.title, &args.body, &args.tags).await?;
    println!("{}", id);
    Ok(())
}

pub async fn run_list(store: &NotesStore, args: ListArgs) -> Result<()> {
    let notes = store.list_all().await?;
    print!("{}", render_list(&notes, args.format)?);
    Ok(())
}

pub async fn run_show(store: &NotesStore, args: ShowArgs) -> Result<()> {
    let note = store.get_by_id(&args.id).await?;
    print!("{}", render_note(&note, args.format)?);
    Ok(())
}

pub async fn run_edit(store: &NotesStore, args: EditArgs) -> Result<()> {
    store
        .update_by_id(&args.id, &args.title, &args.body, &args.tags)
        .await?;
    println!("updated {}", args.id);
    Ok(())
}

pub async fn run_rm(store: &NotesStore, args: IdArgs) -> Result<()> {
    store.delete_by_id(&args.id).await?;
    println!("deleted {}", args.id);
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

fn render_list(notes: &[Note], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(notes)?),
        OutputFormat::Quiet => notes.iter().map(|n| format!("{}\n", n.id)).collect(),
        OutputFormat::Human if notes.is_empty() => "no notes\n".to_string(),
        OutputFormat::Human => notes
            .iter()
            .map(|n| {
                format!(
                    "{}  {}{}  (updated {})\n",
                    n.id,
                    n.title,
                    format_tags(&n.tags),
                    n.updated_at.to_rfc3339()
                )
            })
            .collect(),
    };
    Ok(out)
}

fn render_note(note: &Note, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(note)?),
        OutputFormat::Quiet => format!("{}\n", note.id),
        OutputFormat::Human => format!(
            "id:       {}\ntitle:    {}\ntags:     {}\ncreated:  {}\nupdated:  {}\n\n{}\n",
            note.id,
            note.title,
            tag_field(&note.tags),
            note.created_at.to_rfc3339(),
            note.updated_at.to_rfc3339(),
            note.body
        ),
    };
    Ok(out)
}

/// Tags as a detail-view field value; `-` when there are none
fn tag_field(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(", "))
    }
}
