use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithms::VoteTrendCell;
use crate::models::time::datetime_from_unix_seconds;
use crate::models::PostPda;

// =========================================================
// Vote trend types
// =========================================================

/// One (slot, vote type) row of a vote trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTrendRow {
    /// 0-based slot position.
    pub slot_number: usize,
    pub time_slot_start: DateTime<Utc>,
    /// Exclusive, except on the last slot where it is the latest vote.
    pub time_slot_end: DateTime<Utc>,
    pub vote_type: String,
    pub votes_in_slot: u64,
    /// Votes of `vote_type` up to and including this slot.
    pub cumulative_votes: u64,
}

impl From<&VoteTrendCell> for VoteTrendRow {
    fn from(cell: &VoteTrendCell) -> Self {
        Self {
            slot_number: cell.slot.index,
            time_slot_start: datetime_from_unix_seconds(cell.slot.start),
            time_slot_end: datetime_from_unix_seconds(cell.slot.end),
            vote_type: cell.category.clone(),
            votes_in_slot: cell.count,
            cumulative_votes: cell.cumulative_count,
        }
    }
}

impl From<VoteTrendCell> for VoteTrendRow {
    fn from(cell: VoteTrendCell) -> Self {
        Self::from(&cell)
    }
}

/// Vote trend of one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTrendData {
    pub post_pda: PostPda,
    pub divisions: usize,
    /// Ordered by `(slot_number, vote_type)`; empty when the post has no votes.
    pub rows: Vec<VoteTrendRow>,
}

impl VoteTrendData {
    /// Distinct vote types in row order.
    pub fn vote_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.rows.iter().map(|r| r.vote_type.as_str()).collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Total votes per type, i.e. the cumulative count of the last slot.
    pub fn totals(&self) -> Vec<(&str, u64)> {
        let last_slot = match self.rows.last() {
            Some(row) => row.slot_number,
            None => return Vec::new(),
        };
        self.rows
            .iter()
            .filter(|r| r.slot_number == last_slot)
            .map(|r| (r.vote_type.as_str(), r.cumulative_votes))
            .collect()
    }
}
