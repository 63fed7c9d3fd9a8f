//! Store layer for the indexed forum records.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, analytics services)       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Ingestion with key validation                        │
//! │  - Health checks                                        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! │  Forum / Vote / Activity                                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │  LocalRepository (in-memory) │
//!     │  PostgresRepository (diesel) │
//!     └──────────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! ```ignore
//! use forum_analytics::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let healthy = services::health_check(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

pub use services::{health_check, store_comment, store_reaction, store_reward};

pub use factory::{Backend, RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::{AnalyticsSettings, PostgresConfig, RepositoryConfig};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ActivityRepository, ErrorContext, ForumRepository, FullRepository, RepositoryError,
    RepositoryResult, StoreOperation, VoteRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Backend for the process: the config file's `[repository]` section when
/// a file was loaded, else the environment.
pub fn select_backend(config: Option<&RepositoryConfig>) -> RepositoryResult<Backend> {
    match config {
        Some(config) => Backend::from_config(config),
        None => Backend::from_env(),
    }
}

/// Initialize the global repository singleton.
///
/// Safe to call more than once; later calls keep the first instance.
pub async fn init_repository(
    config: Option<&RepositoryConfig>,
) -> Result<&'static Arc<dyn FullRepository>> {
    if let Some(repo) = REPOSITORY.get() {
        return Ok(repo);
    }

    let backend = select_backend(config).context("Failed to select repository backend")?;
    log::info!(
        "Initializing {:?} repository from {}",
        backend.repository_type(),
        if config.is_some() { "repository.toml" } else { "environment" }
    );
    let repo = backend
        .open()
        .await
        .context("Failed to initialize repository")?;
    let _ = REPOSITORY.set(repo);
    get_repository()
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
