//! Database service layer.
//!
//! Backend-agnostic functions over the repository traits. Callers pass any
//! store implementing the relevant trait, including `dyn FullRepository`.

use crate::db::repository::{ForumRepository, RepositoryError, RepositoryResult, StoreOperation};
use crate::models::{Comment, CommentReaction, Reward};

/// Check that the store is reachable.
pub async fn health_check<R: ForumRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Ingest a comment.
///
/// A comment without an author key is rejected before reaching the store.
pub async fn store_comment<R: ForumRepository + ?Sized>(
    repo: &R,
    comment: &Comment,
) -> RepositoryResult<()> {
    if comment.comment_author_user_pda.trim().is_empty() {
        log::warn!("Rejected comment without author");
        return Err(RepositoryError::rejected(
            StoreOperation::StoreComment,
            "comment_author_user_pda must not be empty",
        ));
    }
    repo.store_comment(comment).await?;
    log::info!(
        "Stored comment {}/{} (vote: {})",
        comment.comment_author_user_pda,
        comment.comment_author_sequence_id,
        comment.content_parsed_vote_to.as_deref().unwrap_or("none")
    );
    Ok(())
}

/// Ingest a reaction.
pub async fn store_reaction<R: ForumRepository + ?Sized>(
    repo: &R,
    reaction: &CommentReaction,
) -> RepositoryResult<()> {
    if reaction.reaction_author_user_pda.trim().is_empty() {
        log::warn!("Rejected reaction without author");
        return Err(RepositoryError::rejected(
            StoreOperation::StoreReaction,
            "reaction_author_user_pda must not be empty",
        ));
    }
    repo.store_reaction(reaction).await?;
    log::info!(
        "Stored {} reaction {}/{}",
        reaction.reaction_type.as_deref().unwrap_or("untyped"),
        reaction.reaction_author_user_pda,
        reaction.reaction_author_sequence_id
    );
    Ok(())
}

/// Ingest a reward.
pub async fn store_reward<R: ForumRepository + ?Sized>(
    repo: &R,
    reward: &Reward,
) -> RepositoryResult<()> {
    if reward.signature.trim().is_empty() {
        log::warn!("Rejected reward without signature");
        return Err(RepositoryError::rejected(
            StoreOperation::StoreReward,
            "signature must not be empty",
        ));
    }
    repo.store_reward(reward).await?;
    log::info!(
        "Stored reward {}#{}/{}",
        reward.signature,
        reward.instruction_sequence,
        reward.reward_sequence
    );
    Ok(())
}
