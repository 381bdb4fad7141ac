//! Database layer - connection pool and schema
//!
//! The pool is created once by the host process and handed to
//! `NotesStore`; nothing in this crate holds a global connection.

pub mod pool;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use schema::ensure_schema;
