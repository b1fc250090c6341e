//! `estimator.toml` settings.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection_string = "estimates.db"
//!
//! [company]
//! name = "Greenline Lawn & Garden"
//! phone = "217-555-0144"
//! currency = "USD"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use quote_core::DbConfig;
use quote_core::export::CompanyProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_DATABASE_FILE: &str = "estimates.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigFile")]
pub struct EstimatorConfig {
    pub database: DbConfig,
    pub company: CompanyProfile,
}

/// On-disk shape. A missing database location means the default file, not
/// the in-memory store `DbConfig` falls back to.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    database: DatabaseSection,
    company: CompanyProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatabaseSection {
    backend: Option<String>,
    connection_string: Option<String>,
}

impl From<ConfigFile> for EstimatorConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            database: DbConfig {
                backend: file.database.backend.unwrap_or_else(|| "sqlite".to_string()),
                connection_string: file
                    .database
                    .connection_string
                    .unwrap_or_else(|| DEFAULT_DATABASE_FILE.to_string()),
            },
            company: file.company,
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            database: DbConfig::sqlite(DEFAULT_DATABASE_FILE),
            company: CompanyProfile::default(),
        }
    }
}

impl EstimatorConfig {
    /// Reads `path`, or returns the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies `--backend` / `--db` flags.
    pub fn with_overrides(
        mut self,
        backend: Option<String>,
        db: Option<String>,
    ) -> Self {
        if let Some(backend) = backend {
            self.database.backend = backend;
        }
        if let Some(db) = db {
            self.database.connection_string = db;
        }
        self
    }
}
