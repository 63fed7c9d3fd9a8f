//! Error type for the analytics pipeline.

use crate::db::repository::RepositoryError;

/// Result type for analytics computations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Failures of the vote trend and activity pipelines.
///
/// Argument validation runs before any store access, so an
/// `InvalidArgument` never leaves partial work behind.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// Division count below one, non-finite timestamps, or an event that does
    /// not belong to the slot range it is aggregated against.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// There were no events to bucket. The service layer turns this into an
    /// empty result set.
    #[error("No events to aggregate")]
    EmptyInput,

    /// The event store failed. Propagated unchanged, never retried here.
    #[error("Store failure: {0}")]
    StoreFailure(#[from] RepositoryError),
}

impl AnalyticsError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}
