//! Structured error types for the notes store.
//!
//! Two domain kinds are surfaced to callers: `Invariant` for a write that
//! should always succeed but came back unconfirmed, and `NotFound` for an id
//! with no stored row. Driver failures pass through untouched as `Database`.

use thiserror::Error;

/// Which operation a not-found error was raised from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Update,
    Delete,
}

/// Main error type for notes store operations
#[derive(Error, Debug)]
pub enum NotesError {
    /// Storage returned no confirmation for a write that must succeed
    #[error("invariant violation: {message}")]
    Invariant { message: String },

    /// No row matches the requested id
    #[error("{}", not_found_message(.action, .resource, .id))]
    NotFound {
        resource: &'static str,
        id: String,
        action: Action,
    },

    /// Anything the driver reports (connectivity, SQL, constraints)
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result type alias for notes store operations
pub type Result<T> = std::result::Result<T, NotesError>;

fn not_found_message(action: &Action, resource: &str, id: &str) -> String {
    match action {
        Action::Get => format!("{} '{}' not found", resource, id),
        Action::Update => format!("failed to update {}: id '{}' not found", resource, id),
        Action::Delete => format!("failed to delete {}: id '{}' not found", resource, id),
    }
}

impl NotesError {
    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// Create a not-found error for a note id
    pub fn note_not_found(id: impl Into<String>, action: Action) -> Self {
        Self::NotFound {
            resource: "note",
            id: id.into(),
            action,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::Invariant { .. })
    }
}
