//! Forum repository trait for ingesting indexed records.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Comment, CommentReaction, Reward};

/// Repository trait for the records the analytics read.
///
/// Stores are upserts keyed by each record's composite primary key, so
/// replaying the indexer is idempotent.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert or replace a comment keyed by
    /// `(comment_author_sequence_id, comment_author_user_pda)`.
    async fn store_comment(&self, comment: &Comment) -> RepositoryResult<()>;

    /// Insert or replace a reaction keyed by
    /// `(reaction_author_sequence_id, reaction_author_user_pda)`.
    async fn store_reaction(&self, reaction: &CommentReaction) -> RepositoryResult<()>;

    /// Insert or replace a reward keyed by
    /// `(signature, instruction_sequence, reward_sequence)`.
    async fn store_reward(&self, reward: &Reward) -> RepositoryResult<()>;
}
