//! Activity repository trait for per-user daily statistics.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{ActivityKind, UserPda};

/// Repository trait for the activity a user receives.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Block times (Unix seconds) of the activity of `kind` received by
    /// `user_pda` at or after `since`.
    ///
    /// * `Likes` - `like` reactions on comments authored by the user
    /// * `Comments` - comments on posts authored by the user
    /// * `Rewards` - rewards paid to the user
    ///
    /// Records without a block time are skipped. Order is unspecified.
    async fn fetch_activity_timestamps(
        &self,
        kind: ActivityKind,
        user_pda: &UserPda,
        since: i64,
    ) -> RepositoryResult<Vec<i64>>;
}
