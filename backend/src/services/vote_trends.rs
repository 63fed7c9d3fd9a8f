//! Vote trend of a post: extraction, bucketing and running totals.

use futures::future::try_join_all;

use crate::algorithms::{compute_vote_trend, validate_divisions};
use crate::db::repository::VoteRepository;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{PostPda, VoteEvent};
use crate::routes::vote_trends::{VoteTrendData, VoteTrendRow};

fn validate_post_pda(post_pda: &PostPda) -> AnalyticsResult<()> {
    if post_pda.is_empty() {
        return Err(AnalyticsError::invalid_argument("post_pda must not be empty"));
    }
    Ok(())
}

/// Fetch the votes of one post, ordered by block time ascending.
///
/// Votes with an empty vote type are dropped even if the store returned
/// them. Store failures surface as `StoreFailure`.
pub async fn extract_vote_events<R: VoteRepository + ?Sized>(
    repo: &R,
    post_pda: &PostPda,
) -> AnalyticsResult<Vec<VoteEvent>> {
    let mut events = repo.fetch_vote_events(post_pda).await?;
    events.retain(|e| !e.category.is_empty());
    events.sort_by(|a, b| a.occurred_at.total_cmp(&b.occurred_at));
    Ok(events)
}

/// Vote trend of `post_pda` over `divisions` uniform time slots.
///
/// A post without votes yields a trend with no rows.
///
/// # Errors
/// * `InvalidArgument` if `divisions` is outside `1..=MAX_DIVISIONS` or
///   `post_pda` is empty; checked before the store is queried
/// * `StoreFailure` if the votes cannot be read
pub async fn get_vote_trends<R: VoteRepository + ?Sized>(
    repo: &R,
    post_pda: &PostPda,
    divisions: usize,
) -> AnalyticsResult<VoteTrendData> {
    validate_divisions(divisions)?;
    validate_post_pda(post_pda)?;

    let events = extract_vote_events(repo, post_pda).await?;
    let cells = compute_vote_trend(&events, divisions)?;
    log::debug!(
        "Vote trend for {}: {} votes, {} rows",
        post_pda,
        events.len(),
        cells.len()
    );

    Ok(VoteTrendData {
        post_pda: post_pda.clone(),
        divisions,
        rows: cells.iter().map(VoteTrendRow::from).collect(),
    })
}

/// Vote trends of several posts, computed concurrently.
///
/// Results keep the order of `post_pdas`. The first failure fails the whole
/// batch.
pub async fn get_vote_trends_for_posts<R: VoteRepository + ?Sized>(
    repo: &R,
    post_pdas: &[PostPda],
    divisions: usize,
) -> AnalyticsResult<Vec<VoteTrendData>> {
    validate_divisions(divisions)?;
    for post_pda in post_pdas {
        validate_post_pda(post_pda)?;
    }

    try_join_all(
        post_pdas
            .iter()
            .map(|post_pda| get_vote_trends(repo, post_pda, divisions)),
    )
    .await
}
