//! Backend selection.
//!
//! A store is chosen from a `repository.toml`, from the environment or
//! explicitly, resolved into a [`Backend`] and opened as
//! `Arc<dyn FullRepository>`.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::{PostgresConfig, RepositoryConfig};
use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Kind of store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Diesel over PostgreSQL (`postgres-repo` feature)
    Postgres,
    /// In-memory maps
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Accepts `postgres`, `pg` and `local`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// `REPOSITORY_TYPE` when set and valid. Otherwise Postgres if a database
    /// URL is present, else Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }
        let has_url = ["DATABASE_URL", "PG_DATABASE_URL"]
            .iter()
            .any(|key| std::env::var(key).is_ok());
        if has_url {
            Self::Postgres
        } else {
            Self::Local
        }
    }
}

/// A backend together with the settings needed to open it.
#[derive(Debug, Clone)]
pub enum Backend {
    Local,
    Postgres(PostgresConfig),
}

impl Backend {
    pub fn from_env() -> RepositoryResult<Self> {
        match RepositoryType::from_env() {
            RepositoryType::Local => Ok(Self::Local),
            RepositoryType::Postgres => PostgresConfig::from_env().map(Self::Postgres),
        }
    }

    /// Backend named by `[repository]`, with `[postgres]` when selected.
    pub fn from_config(config: &RepositoryConfig) -> RepositoryResult<Self> {
        match config.repository_type()? {
            RepositoryType::Local => Ok(Self::Local),
            RepositoryType::Postgres if config.postgres.database_url.trim().is_empty() => Err(
                RepositoryError::configuration("type = \"postgres\" needs postgres.database_url"),
            ),
            RepositoryType::Postgres => Ok(Self::Postgres(config.postgres.clone())),
        }
    }

    pub fn repository_type(&self) -> RepositoryType {
        match self {
            Self::Local => RepositoryType::Local,
            Self::Postgres(_) => RepositoryType::Postgres,
        }
    }

    /// Open the store. Postgres pool setup and migrations run on the blocking
    /// thread pool.
    pub async fn open(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        match self {
            Self::Local => Ok(Arc::new(LocalRepository::new())),
            #[cfg(feature = "postgres-repo")]
            Self::Postgres(config) => {
                use super::repositories::PostgresRepository;
                use super::repository::StoreOperation;

                let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
                    .await
                    .map_err(|e| RepositoryError::internal(StoreOperation::Connect, e.to_string()))??;
                Ok(Arc::new(repo))
            }
            #[cfg(not(feature = "postgres-repo"))]
            Self::Postgres(_) => Err(RepositoryError::configuration(
                "built without the postgres-repo feature",
            )),
        }
    }
}

/// Entry points for opening a store.
///
/// # Example
/// ```ignore
/// use forum_analytics::db::{RepositoryFactory, RepositoryType};
///
/// let repo = RepositoryFactory::create(RepositoryType::Local, None).await?;
/// assert!(repo.health_check().await?);
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// `postgres_config` is required for [`RepositoryType::Postgres`] and
    /// ignored otherwise.
    pub async fn create(
        repo_type: RepositoryType,
        postgres_config: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let backend = match (repo_type, postgres_config) {
            (RepositoryType::Local, _) => Backend::Local,
            (RepositoryType::Postgres, Some(config)) => Backend::Postgres(config.clone()),
            (RepositoryType::Postgres, None) => {
                return Err(RepositoryError::configuration(
                    "Postgres repository requires PostgresConfig",
                ))
            }
        };
        backend.open().await
    }

    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        Backend::from_env()?.open().await
    }

    pub async fn from_config_file<P: AsRef<Path>>(
        path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        Self::from_repository_config(&RepositoryConfig::from_file(path)?).await
    }

    pub async fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        Self::from_repository_config(&RepositoryConfig::from_default_location()?).await
    }

    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let backend = Backend::from_config(config)?;
        log::info!("Opening {:?} repository from config", backend.repository_type());
        backend.open().await
    }
}

/// Fluent construction of a store.
///
/// # Example
/// ```ignore
/// use forum_analytics::db::{RepositoryBuilder, RepositoryType};
///
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .build()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    postgres_config: Option<PostgresConfig>,
}

impl RepositoryBuilder {
    /// Starts from the type selected by the environment.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            postgres_config: None,
        }
    }

    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    pub fn postgres_config(mut self, config: PostgresConfig) -> Self {
        self.postgres_config = Some(config);
        self
    }

    pub fn from_env(self) -> RepositoryResult<Self> {
        Ok(self.with_backend(Backend::from_env()?))
    }

    pub fn from_config_file<P: AsRef<Path>>(self, path: P) -> RepositoryResult<Self> {
        let backend = Backend::from_config(&RepositoryConfig::from_file(path)?)?;
        Ok(self.with_backend(backend))
    }

    pub fn from_default_config(self) -> RepositoryResult<Self> {
        let backend = Backend::from_config(&RepositoryConfig::from_default_location()?)?;
        Ok(self.with_backend(backend))
    }

    fn with_backend(mut self, backend: Backend) -> Self {
        self.repo_type = backend.repository_type();
        if let Backend::Postgres(config) = backend {
            self.postgres_config = Some(config);
        }
        self
    }

    pub async fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryFactory::create(self.repo_type, self.postgres_config.as_ref()).await
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
