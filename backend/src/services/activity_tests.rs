#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::algorithms::DEFAULT_WINDOW_DAYS;
    use crate::db::repository::ForumRepository;
    use crate::db::LocalRepository;
    use crate::error::AnalyticsError;
    use crate::models::time::start_of_day;
    use crate::models::{ActivityKind, Comment, CommentReaction, Reward, UserPda};
    use crate::services::activity::get_daily_stats;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn at(day: u32, seconds: i64) -> i64 {
        start_of_day(NaiveDate::from_ymd_opt(2025, 6, day).unwrap()) + seconds
    }

    fn reaction(seq: i32, kind: &str, comment_author: &str, time: i64) -> CommentReaction {
        CommentReaction {
            reaction_author_sequence_id: seq,
            reaction_author_user_pda: "fan".to_string(),
            parent_post_pda: Some("post".to_string()),
            parent_comment_sequence_id: Some(1),
            parent_comment_author_user_pda: Some(comment_author.to_string()),
            reaction_type: Some(kind.to_string()),
            content: None,
            create_transaction_block_time: Some(time),
        }
    }

    fn reply(seq: i32, post_author: &str, time: i64) -> Comment {
        Comment {
            comment_author_sequence_id: seq,
            comment_author_user_pda: "replier".to_string(),
            parent_post_pda: Some("post".to_string()),
            parent_post_author_user_pda: Some(post_author.to_string()),
            content: Some("nice".to_string()),
            content_parsed_vote_to: None,
            create_transaction_block_time: Some(time),
        }
    }

    fn reward(seq: i32, receiver: &str, time: i64) -> Reward {
        Reward {
            signature: "sig".to_string(),
            instruction_sequence: 0,
            reward_sequence: seq,
            receiver_user_pda: Some(receiver.to_string()),
            amount: Some(10),
            reward_type: Some("daily".to_string()),
            create_transaction_block_time: Some(time),
        }
    }

    #[tokio::test]
    async fn test_daily_likes_count_only_likes_on_users_comments() {
        let repo = LocalRepository::new();
        repo.store_reaction(&reaction(1, "like", "alice", at(10, 5)))
            .await
            .unwrap();
        repo.store_reaction(&reaction(2, "like", "alice", at(10, 90)))
            .await
            .unwrap();
        repo.store_reaction(&reaction(3, "upvote", "alice", at(10, 100)))
            .await
            .unwrap();
        repo.store_reaction(&reaction(4, "like", "bob", at(10, 100)))
            .await
            .unwrap();
        repo.store_reaction(&reaction(5, "like", "alice", at(8, 0)))
            .await
            .unwrap();

        let stats = get_daily_stats(
            &repo,
            ActivityKind::Likes,
            &UserPda::from("alice"),
            today(),
            DEFAULT_WINDOW_DAYS,
        )
        .await
        .unwrap();

        assert_eq!(stats.days.len(), 7);
        assert_eq!(stats.days[0].day, "2025-06-10");
        assert_eq!(stats.days[0].count, 2);
        assert_eq!(stats.days[1].count, 0);
        assert_eq!(stats.days[2].day, "2025-06-08");
        assert_eq!(stats.days[2].count, 1);
        assert_eq!(stats.days[6].day, "2025-06-04");
        assert_eq!(stats.total(), 3);
    }

    #[tokio::test]
    async fn test_daily_comments_window_excludes_older_days() {
        let repo = LocalRepository::new();
        repo.store_comment(&reply(1, "alice", at(4, 0))).await.unwrap();
        repo.store_comment(&reply(2, "alice", at(3, 86_399)))
            .await
            .unwrap();

        let stats = get_daily_stats(
            &repo,
            ActivityKind::Comments,
            &UserPda::from("alice"),
            today(),
            7,
        )
        .await
        .unwrap();

        assert_eq!(stats.total(), 1);
        assert_eq!(stats.days[6].count, 1);
    }

    #[tokio::test]
    async fn test_daily_rewards_zero_filled_for_new_user() {
        let repo = LocalRepository::new();
        repo.store_reward(&reward(1, "bob", at(9, 10))).await.unwrap();

        let stats = get_daily_stats(
            &repo,
            ActivityKind::Rewards,
            &UserPda::from("carol"),
            today(),
            3,
        )
        .await
        .unwrap();

        let days: Vec<&str> = stats.days.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, vec!["2025-06-10", "2025-06-09", "2025-06-08"]);
        assert!(stats.days.iter().all(|d| d.count == 0));
    }

    #[tokio::test]
    async fn test_zero_day_window_rejected() {
        let repo = LocalRepository::new();
        let err = get_daily_stats(
            &repo,
            ActivityKind::Likes,
            &UserPda::from("alice"),
            today(),
            0,
        )
        .await
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        let err = get_daily_stats(
            &repo,
            ActivityKind::Rewards,
            &UserPda::from("alice"),
            today(),
            7,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::StoreFailure(_)));
    }
}
