use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::db::DEFAULT_MAX_CONNECTIONS;

const DATABASE_URL_VAR: &str = "DATABASE_URL";
const MAX_CONNECTIONS_VAR: &str = "NOTESCTL_MAX_CONNECTIONS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not set (export it or add it to a .env file)")]
    MissingVar { var: &'static str },

    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Environment variables already set
/// 2. Current directory .env
/// 3. ~/.notesctl/.env
///
/// Returns the files that were loaded. Runs before the subscriber exists,
/// so reporting them is left to the caller.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Some(dir) = config_dir() {
        candidates.push(dir.join(".env"));
    }
    load_dotenv_from(&candidates)
}

/// Load each existing file in order; earlier files win since dotenvy never
/// overwrites variables that are already set.
pub fn load_dotenv_from(candidates: &[PathBuf]) -> Vec<PathBuf> {
    candidates
        .iter()
        .filter(|path| path.is_file())
        .filter(|path| dotenvy::from_path(path).is_ok())
        .cloned()
        .collect()
}

/// The notesctl config directory (~/.notesctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".notesctl"))
}

/// Connection settings for the notes store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Read `DATABASE_URL` and `NOTESCTL_MAX_CONNECTIONS` from the process
    /// environment. Call `load_dotenv` first to pick up .env files.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingVar {
                var: DATABASE_URL_VAR,
            })?;

        let max_connections = match lookup(MAX_CONNECTIONS_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: MAX_CONNECTIONS_VAR,
                    value: raw,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
