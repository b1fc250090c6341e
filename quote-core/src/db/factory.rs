use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::repository::{EstimateRepository, RepositoryError};

/// Where saved estimates live.
///
/// `backend` names a registered [`RepositoryFactory`]; `connection_string`
/// is handed to that factory as-is.
///
/// | backend    | connection_string examples          |
/// |------------|-------------------------------------|
/// | `sqlite`   | `estimates.db`, `:memory:`          |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
}

impl DbConfig {
    /// A SQLite store at `path` (or `:memory:`).
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: path.into(),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::sqlite(":memory:")
    }
}

/// Opens repositories for one storage backend. Backend crates export a unit
/// struct implementing this and the binary registers it at startup.
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    /// Opens (or creates) the store and returns a ready repository, with
    /// migrations applied.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn EstimateRepository>, RepositoryError>;
}

/// Backend factories keyed by name. The binary registers one per backend
/// crate it links, then opens whichever one the config names.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a second factory under a taken name replaces the first.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the store `config` describes.
    ///
    /// Fails with [`RepositoryError::Configuration`] when `config.backend`
    /// was never registered; otherwise returns whatever the factory does.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn EstimateRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown backend '{}'; available: {}",
                config.backend,
                self.available_backends().join(", ")
            )));
        };

        tracing::debug!(
            backend = %config.backend,
            path = %config.connection_string,
            "opening estimate store"
        );
        factory.create(config).await
    }
}
