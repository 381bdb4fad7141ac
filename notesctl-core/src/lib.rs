//! notesctl-core: PostgreSQL-backed notes store
//!
//! Every operation is a single parameterized statement against a shared
//! `PgPool`. Nothing is cached in memory; the `notes` table is the only
//! source of truth.
//!
//! ```ignore
//! let pool = notesctl_core::db::create_pool(&database_url).await?;
//! notesctl_core::db::ensure_schema(&pool).await?;
//!
//! let store = NotesStore::new(pool);
//! let id = store.create("Shopping", "Buy milk", &["errand".into()]).await?;
//! let note = store.get_by_id(&id).await?;
//! ```

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod id;
pub mod model;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_dotenv, load_dotenv_from, ConfigError, StoreConfig};
pub use error::{Action, NotesError, Result};
pub use id::{IdGenerator, NanoIdGenerator, NOTE_ID_LEN};
pub use model::{Note, NoteRow};
pub use store::NotesStore;
