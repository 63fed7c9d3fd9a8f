//! Tests for the in-memory repository through the repository traits.

mod support;

use forum_analytics::db::{
    services, ActivityRepository, ForumRepository, LocalRepository, RepositoryError,
    VoteRepository,
};
use forum_analytics::models::{ActivityKind, PostPda, UserPda, VoteEvent};

#[tokio::test]
async fn test_vote_events_only_for_requested_post() {
    let repo = LocalRepository::new();
    repo.store_comment(&support::vote_comment(1, "alice", "post-a", "yes", 300))
        .await
        .unwrap();
    repo.store_comment(&support::vote_comment(2, "alice", "post-a", "no", 100))
        .await
        .unwrap();
    repo.store_comment(&support::vote_comment(1, "bob", "post-b", "yes", 200))
        .await
        .unwrap();

    let events = repo
        .fetch_vote_events(&PostPda::from("post-a"))
        .await
        .unwrap();
    assert_eq!(
        events,
        vec![VoteEvent::new(100.0, "no"), VoteEvent::new(300.0, "yes")]
    );

    let none = repo
        .fetch_vote_events(&PostPda::from("post-c"))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_comment_without_vote_is_not_an_event() {
    let repo = LocalRepository::new();
    let mut plain = support::vote_comment(1, "alice", "post-a", "yes", 100);
    plain.content_parsed_vote_to = None;
    repo.store_comment(&plain).await.unwrap();

    let mut blank = support::vote_comment(2, "alice", "post-a", "", 150);
    blank.content = Some("no vote here".to_string());
    repo.store_comment(&blank).await.unwrap();

    assert_eq!(repo.comment_count(), 2);
    let events = repo
        .fetch_vote_events(&PostPda::from("post-a"))
        .await
        .unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_restoring_a_comment_replaces_it() {
    let repo = LocalRepository::new();
    repo.store_comment(&support::vote_comment(1, "alice", "post-a", "yes", 100))
        .await
        .unwrap();
    repo.store_comment(&support::vote_comment(1, "alice", "post-a", "no", 100))
        .await
        .unwrap();

    assert_eq!(repo.comment_count(), 1);
    let events = repo
        .fetch_vote_events(&PostPda::from("post-a"))
        .await
        .unwrap();
    assert_eq!(events, vec![VoteEvent::new(100.0, "no")]);
}

#[tokio::test]
async fn test_like_timestamps_filter_type_user_and_since() {
    let repo = LocalRepository::new();
    repo.store_reaction(&support::reaction(1, "like", "carol", 1_000))
        .await
        .unwrap();
    repo.store_reaction(&support::reaction(2, "like", "carol", 5_000))
        .await
        .unwrap();
    repo.store_reaction(&support::reaction(3, "upvote", "carol", 6_000))
        .await
        .unwrap();
    repo.store_reaction(&support::reaction(4, "like", "dave", 7_000))
        .await
        .unwrap();

    let mut times = repo
        .fetch_activity_timestamps(ActivityKind::Likes, &UserPda::from("carol"), 2_000)
        .await
        .unwrap();
    times.sort_unstable();
    assert_eq!(times, vec![5_000]);
}

#[tokio::test]
async fn test_comment_and_reward_timestamps() {
    let repo = LocalRepository::new();
    repo.store_comment(&support::vote_comment(1, "alice", "post-a", "yes", 10))
        .await
        .unwrap();
    repo.store_reward(&support::reward(1, "erin", 20)).await.unwrap();
    repo.store_reward(&support::reward(2, "erin", 30)).await.unwrap();

    let comments = repo
        .fetch_activity_timestamps(ActivityKind::Comments, &UserPda::from("post-author"), 0)
        .await
        .unwrap();
    assert_eq!(comments, vec![10]);

    let mut rewards = repo
        .fetch_activity_timestamps(ActivityKind::Rewards, &UserPda::from("erin"), 0)
        .await
        .unwrap();
    rewards.sort_unstable();
    assert_eq!(rewards, vec![20, 30]);
}

#[tokio::test]
async fn test_unhealthy_store_reports_connection_error() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    assert!(!repo.health_check().await.unwrap());
    let err = repo
        .fetch_vote_events(&PostPda::from("post-a"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
    assert!(err.is_retryable());

    repo.set_healthy(true);
    assert!(repo
        .fetch_vote_events(&PostPda::from("post-a"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_service_layer_rejects_missing_keys() {
    let repo = LocalRepository::new();

    let comment = support::vote_comment(1, "  ", "post-a", "yes", 100);
    let err = services::store_comment(&repo, &comment).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let mut reward = support::reward(1, "erin", 20);
    reward.signature.clear();
    assert!(services::store_reward(&repo, &reward).await.is_err());

    let mut reaction = support::reaction(1, "like", "carol", 1_000);
    reaction.reaction_author_user_pda = String::new();
    assert!(services::store_reaction(&repo, &reaction).await.is_err());

    assert_eq!(repo.comment_count(), 0);
    assert_eq!(repo.reward_count(), 0);
    assert_eq!(repo.reaction_count(), 0);
}

#[tokio::test]
async fn test_clear_drops_everything() {
    let repo = LocalRepository::new();
    services::store_comment(&repo, &support::vote_comment(1, "alice", "post-a", "yes", 100))
        .await
        .unwrap();
    services::store_reward(&repo, &support::reward(1, "erin", 20))
        .await
        .unwrap();
    repo.clear();
    assert_eq!(repo.comment_count(), 0);
    assert_eq!(repo.reward_count(), 0);
}
