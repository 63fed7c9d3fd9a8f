//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::db::AnalyticsSettings;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Request limits for the analytics endpoints
    pub analytics: AnalyticsSettings,
}

impl AppState {
    /// Create a state with default analytics settings.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self::with_settings(repository, AnalyticsSettings::default())
    }

    pub fn with_settings(repository: Arc<dyn FullRepository>, analytics: AnalyticsSettings) -> Self {
        Self {
            repository,
            analytics,
        }
    }
}
