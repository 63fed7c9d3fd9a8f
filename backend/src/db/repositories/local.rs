//! In-memory repository for unit testing and local development.
//!
//! Records live in hash maps keyed by their composite primary keys behind a
//! `parking_lot::RwLock`. The health flag can be flipped to simulate an
//! unreachable store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::db::repository::{
    ActivityRepository, ForumRepository, RepositoryError, RepositoryResult, StoreOperation,
    VoteRepository,
};
use crate::models::{
    ActivityKind, Comment, CommentReaction, PostPda, Reward, UserPda, VoteEvent,
};

#[derive(Debug, Default)]
struct LocalData {
    comments: HashMap<(i32, String), Comment>,
    reactions: HashMap<(i32, String), CommentReaction>,
    rewards: HashMap<(String, i32, i32), Reward>,
}

/// In-memory repository implementation.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
    healthy: Arc<AtomicBool>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the store as reachable or not. While unhealthy every operation
    /// fails with a connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn comment_count(&self) -> usize {
        self.data.read().comments.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.data.read().reactions.len()
    }

    pub fn reward_count(&self) -> usize {
        self.data.read().rewards.len()
    }

    /// Drop every stored record.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.comments.clear();
        data.reactions.clear();
        data.rewards.clear();
    }

    fn ensure_healthy(&self, operation: StoreOperation) -> RepositoryResult<()> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(RepositoryError::connection(
                operation,
                "local repository marked unhealthy",
            ))
        }
    }
}

fn require_key(value: &str, operation: StoreOperation, field: &str) -> RepositoryResult<()> {
    if value.trim().is_empty() {
        return Err(RepositoryError::rejected(
            operation,
            format!("{} must not be empty", field),
        ));
    }
    Ok(())
}

#[async_trait]
impl ForumRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.healthy.load(Ordering::SeqCst))
    }

    async fn store_comment(&self, comment: &Comment) -> RepositoryResult<()> {
        self.ensure_healthy(StoreOperation::StoreComment)?;
        require_key(
            &comment.comment_author_user_pda,
            StoreOperation::StoreComment,
            "comment_author_user_pda",
        )?;
        self.data
            .write()
            .comments
            .insert(comment.key(), comment.clone());
        Ok(())
    }

    async fn store_reaction(&self, reaction: &CommentReaction) -> RepositoryResult<()> {
        self.ensure_healthy(StoreOperation::StoreReaction)?;
        require_key(
            &reaction.reaction_author_user_pda,
            StoreOperation::StoreReaction,
            "reaction_author_user_pda",
        )?;
        self.data
            .write()
            .reactions
            .insert(reaction.key(), reaction.clone());
        Ok(())
    }

    async fn store_reward(&self, reward: &Reward) -> RepositoryResult<()> {
        self.ensure_healthy(StoreOperation::StoreReward)?;
        require_key(&reward.signature, StoreOperation::StoreReward, "signature")?;
        self.data.write().rewards.insert(reward.key(), reward.clone());
        Ok(())
    }
}

#[async_trait]
impl VoteRepository for LocalRepository {
    async fn fetch_vote_events(&self, post_pda: &PostPda) -> RepositoryResult<Vec<VoteEvent>> {
        self.ensure_healthy(StoreOperation::FetchVoteEvents)
            .map_err(|e| e.with_key(post_pda))?;
        let data = self.data.read();
        let mut events: Vec<VoteEvent> = data
            .comments
            .values()
            .filter(|c| c.parent_post_pda.as_deref() == Some(post_pda.as_str()))
            .filter_map(Comment::vote_event)
            .collect();
        events.sort_by(|a, b| a.occurred_at.total_cmp(&b.occurred_at));
        Ok(events)
    }
}

#[async_trait]
impl ActivityRepository for LocalRepository {
    async fn fetch_activity_timestamps(
        &self,
        kind: ActivityKind,
        user_pda: &UserPda,
        since: i64,
    ) -> RepositoryResult<Vec<i64>> {
        self.ensure_healthy(StoreOperation::FetchActivity(kind))
            .map_err(|e| e.with_key(user_pda))?;
        let user = Some(user_pda.as_str());
        let data = self.data.read();

        let times: Vec<Option<i64>> = match kind {
            ActivityKind::Likes => data
                .reactions
                .values()
                .filter(|r| r.is_like() && r.parent_comment_author_user_pda.as_deref() == user)
                .map(|r| r.create_transaction_block_time)
                .collect(),
            ActivityKind::Comments => data
                .comments
                .values()
                .filter(|c| c.parent_post_author_user_pda.as_deref() == user)
                .map(|c| c.create_transaction_block_time)
                .collect(),
            ActivityKind::Rewards => data
                .rewards
                .values()
                .filter(|r| r.receiver_user_pda.as_deref() == user)
                .map(|r| r.create_transaction_block_time)
                .collect(),
        };

        Ok(times.into_iter().flatten().filter(|t| *t >= since).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(seq: i32, post: &str, vote_to: &str, at: i64) -> Comment {
        Comment {
            comment_author_sequence_id: seq,
            comment_author_user_pda: "voter".to_string(),
            parent_post_pda: Some(post.to_string()),
            parent_post_author_user_pda: Some("op".to_string()),
            content: None,
            content_parsed_vote_to: Some(vote_to.to_string()),
            create_transaction_block_time: Some(at),
        }
    }

    #[tokio::test]
    async fn test_store_comment_upserts_by_key() {
        let repo = LocalRepository::new();
        repo.store_comment(&vote(1, "p", "up", 10)).await.unwrap();
        repo.store_comment(&vote(1, "p", "down", 10)).await.unwrap();
        assert_eq!(repo.comment_count(), 1);

        let events = repo.fetch_vote_events(&PostPda::from("p")).await.unwrap();
        assert_eq!(events, vec![VoteEvent::new(10.0, "down")]);
    }

    #[tokio::test]
    async fn test_vote_events_sorted_and_filtered() {
        let repo = LocalRepository::new();
        repo.store_comment(&vote(1, "p", "up", 30)).await.unwrap();
        repo.store_comment(&vote(2, "p", "", 20)).await.unwrap();
        repo.store_comment(&vote(3, "p", "down", 10)).await.unwrap();
        repo.store_comment(&vote(4, "other", "up", 5)).await.unwrap();

        let events = repo.fetch_vote_events(&PostPda::from("p")).await.unwrap();
        assert_eq!(
            events,
            vec![VoteEvent::new(10.0, "down"), VoteEvent::new(30.0, "up")]
        );
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());

        let err = repo
            .fetch_vote_events(&PostPda::from("p"))
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        let context = err.context().unwrap();
        assert_eq!(context.operation, StoreOperation::FetchVoteEvents);
        assert_eq!(context.key.as_deref(), Some("p"));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let repo = LocalRepository::new();
        let mut comment = vote(1, "p", "up", 1);
        comment.comment_author_user_pda = " ".to_string();
        let err = repo.store_comment(&comment).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }
}
