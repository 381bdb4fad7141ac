//! notesctl CLI - create, list, show, edit and remove notes in PostgreSQL
//!
//! A thin caller over `notesctl_core::NotesStore`. Connection settings come
//! from flags, then `DATABASE_URL` / `NOTESCTL_MAX_CONNECTIONS`, with `.env`
//! files loaded first.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notesctl_core::db::create_pool_with_options;
use notesctl_core::{load_dotenv, NotesStore, StoreConfig};
use tracing::{debug, info};

mod commands;
mod tracing_setup;

use commands::{AddArgs, EditArgs, IdArgs, ListArgs, ShowArgs};

#[derive(Parser, Debug)]
#[command(
    name = "notesctl",
    author,
    version,
    about = "Manage notes stored in PostgreSQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(
        long,
        env = "NOTESCTL_MAX_CONNECTIONS",
        global = true,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_connections: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the notes table if it does not exist
    InitDb,
    /// Add a note and print its id
    Add(AddArgs),
    /// List every note
    List(ListArgs),
    /// Show a single note
    Show(ShowArgs),
    /// Replace a note's title, body and tags
    Edit(EditArgs),
    /// Delete a note
    Rm(IdArgs),
}

impl Cli {
    fn store_config(&self) -> Result<StoreConfig> {
        let mut config = match &self.database_url {
            Some(url) => StoreConfig::new(url.clone()),
            None => StoreConfig::from_env()?,
        };
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads `env = ...` fallbacks
    let env_files = load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    if env_files.is_empty() {
        debug!("No .env files found, using environment variables only");
    } else {
        let paths: Vec<String> = env_files.iter().map(|p| p.display().to_string()).collect();
        info!("Loaded configuration from: {}", paths.join(", "));
    }

    let config = cli.store_config()?;
    debug!(max_connections = config.max_connections, "connecting");

    let pool = create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    let store = NotesStore::new(pool);

    let result = match cli.command {
        Commands::InitDb => commands::run_init_db(&store).await,
        Commands::Add(args) => commands::run_add(&store, args).await,
        Commands::List(args) => commands::run_list(&store, args).await,
        Commands::Show(args) => commands::run_show(&store, args).await,
        Commands::Edit(args) => commands::run_edit(&store, args).await,
        Commands::Rm(args) => commands::run_rm(&store, args).await,
    };

    store.pool().close().await;
    result
}
