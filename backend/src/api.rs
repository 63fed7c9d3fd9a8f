//! Public API surface for the analytics backend.
//!
//! This file consolidates the DTO types returned by the services and the
//! HTTP API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::activity::DailyStat;
pub use crate::routes::activity::DailyStatsData;
pub use crate::routes::vote_trends::VoteTrendData;
pub use crate::routes::vote_trends::VoteTrendRow;

pub use crate::models::{
    ActivityKind, Comment, CommentReaction, PostPda, Reward, UserPda, VoteEvent,
};
