//! Error types for store operations.
//!
//! Every backend reports failures through [`RepositoryError`]. Errors raised
//! by a store call carry an [`ErrorContext`] naming the [`StoreOperation`]
//! and, when one is known, the key of the post, user or record involved.

use std::fmt;

use crate::models::ActivityKind;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// The store call an error was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Opening the pool or checking out a connection.
    Connect,
    Migrate,
    HealthCheck,
    StoreComment,
    StoreReaction,
    StoreReward,
    FetchVoteEvents,
    FetchActivity(ActivityKind),
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => f.write_str("connect"),
            Self::Migrate => f.write_str("migrate"),
            Self::HealthCheck => f.write_str("health_check"),
            Self::StoreComment => f.write_str("store_comment"),
            Self::StoreReaction => f.write_str("store_reaction"),
            Self::StoreReward => f.write_str("store_reward"),
            Self::FetchVoteEvents => f.write_str("fetch_vote_events"),
            Self::FetchActivity(kind) => write!(f, "fetch_activity_timestamps({})", kind),
        }
    }
}

/// Where a store error happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub operation: StoreOperation,
    /// Post, user or composite record key the operation worked on.
    pub key: Option<String>,
    /// Retrying the same call may succeed.
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: StoreOperation) -> Self {
        Self {
            operation,
            key: None,
            retryable: false,
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}", self.operation)?;
        if let Some(key) = &self.key {
            write!(f, " key={}", key)?;
        }
        if self.retryable {
            f.write_str(" retryable")?;
        }
        f.write_str("]")
    }
}

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached.
    #[error("Connection error: {message} {context}")]
    ConnectionError {
        message: String,
        context: ErrorContext,
    },

    /// No connection became available in time.
    #[error("Timeout error: {message} {context}")]
    TimeoutError {
        message: String,
        context: ErrorContext,
    },

    #[error("Query error: {message} {context}")]
    QueryError {
        message: String,
        context: ErrorContext,
    },

    /// A record was rejected before reaching the store.
    #[error("Rejected record: {message} {context}")]
    ValidationError {
        message: String,
        context: ErrorContext,
    },

    /// Backend selection or settings are unusable. Raised before any store
    /// call, so there is no operation to report.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {message} {context}")]
    InternalError {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    /// Unreachable store. Always retryable.
    pub fn connection(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::ConnectionError {
            message: message.into(),
            context: ErrorContext {
                retryable: true,
                ..ErrorContext::new(operation)
            },
        }
    }

    /// Connection checkout timed out. Always retryable.
    pub fn timeout(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::TimeoutError {
            message: message.into(),
            context: ErrorContext {
                retryable: true,
                ..ErrorContext::new(operation)
            },
        }
    }

    pub fn query(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::QueryError {
            message: message.into(),
            context: ErrorContext::new(operation),
        }
    }

    pub fn rejected(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            context: ErrorContext::new(operation),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    pub fn internal(operation: StoreOperation, message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
            context: ErrorContext::new(operation),
        }
    }

    /// Attach the key of the post, user or record the operation worked on.
    pub fn with_key(mut self, key: impl fmt::Display) -> Self {
        if let Some(context) = self.context_mut() {
            context.key = Some(key.to_string());
        }
        self
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::ConnectionError { context, .. }
            | Self::TimeoutError { context, .. }
            | Self::QueryError { context, .. }
            | Self::ValidationError { context, .. }
            | Self::InternalError { context, .. } => Some(context),
            Self::ConfigurationError(_) => None,
        }
    }

    fn context_mut(&mut self) -> Option<&mut ErrorContext> {
        match self {
            Self::ConnectionError { context, .. }
            | Self::TimeoutError { context, .. }
            | Self::QueryError { context, .. }
            | Self::ValidationError { context, .. }
            | Self::InternalError { context, .. } => Some(context),
            Self::ConfigurationError(_) => None,
        }
    }

    pub fn operation(&self) -> Option<StoreOperation> {
        self.context().map(|c| c.operation)
    }

    pub fn is_retryable(&self) -> bool {
        self.context().is_some_and(|c| c.retryable)
    }

    /// Map a diesel failure of `operation`.
    ///
    /// Serialization failures of concurrent upserts are retryable; every
    /// other database error is final.
    #[cfg(feature = "postgres-repo")]
    pub fn from_diesel(operation: StoreOperation, err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                Self::QueryError {
                    message: info.message().to_string(),
                    context: ErrorContext {
                        retryable: true,
                        ..ErrorContext::new(operation)
                    },
                }
            }
            Error::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
                Self::connection(operation, info.message())
            }
            Error::DatabaseError(kind, info) => {
                Self::query(operation, format!("{:?}: {}", kind, info.message()))
            }
            Error::DeserializationError(e) => {
                Self::internal(operation, format!("unreadable row: {}", e))
            }
            other => Self::query(operation, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let err = RepositoryError::connection(StoreOperation::StoreComment, "refused")
            .with_key("7/author");
        assert_eq!(
            err.to_string(),
            "Connection error: refused [store_comment key=7/author retryable]"
        );
    }

    #[test]
    fn test_activity_operation_names_kind() {
        let err = RepositoryError::query(
            StoreOperation::FetchActivity(ActivityKind::Likes),
            "bad column",
        );
        assert_eq!(
            err.to_string(),
            "Query error: bad column [fetch_activity_timestamps(likes)]"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(RepositoryError::connection(StoreOperation::Connect, "down").is_retryable());
        assert!(RepositoryError::timeout(StoreOperation::Connect, "slow").is_retryable());
        assert!(!RepositoryError::query(StoreOperation::FetchVoteEvents, "bad sql").is_retryable());
        assert!(!RepositoryError::rejected(StoreOperation::StoreReward, "empty key").is_retryable());
        assert!(!RepositoryError::configuration("missing url").is_retryable());
    }

    #[test]
    fn test_configuration_error_has_no_context() {
        let err = RepositoryError::configuration("no backend").with_key("ignored");
        assert!(err.context().is_none());
        assert!(err.operation().is_none());
        assert_eq!(err.to_string(), "Configuration error: no backend");
    }
}
