//! Vote repository trait: the event source of the vote trend analysis.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{PostPda, VoteEvent};

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Fetch every vote cast on `post_pda`.
    ///
    /// Votes are comments whose parsed vote target is present and non-empty.
    /// Comments without a block time are skipped.
    ///
    /// # Returns
    /// * `Ok(Vec<VoteEvent>)` - Votes ordered by block time ascending; empty
    ///   when the post has no votes or does not exist
    /// * `Err(RepositoryError)` - If the store cannot be read
    async fn fetch_vote_events(&self, post_pda: &PostPda) -> RepositoryResult<Vec<VoteEvent>>;
}
