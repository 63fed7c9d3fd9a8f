//! Forum records indexed from the chain and the events derived from them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

crate::define_pda_type!(PostPda);
crate::define_pda_type!(UserPda);

/// One recorded vote on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteEvent {
    /// Block time of the vote, seconds since the Unix epoch.
    pub occurred_at: f64,
    /// Vote target (the option voted for). Never empty.
    pub category: String,
}

impl VoteEvent {
    pub fn new(occurred_at: f64, category: impl Into<String>) -> Self {
        Self {
            occurred_at,
            category: category.into(),
        }
    }
}

/// A comment on a post. Comments that carry a parsed vote are the input of
/// the vote trend analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_author_sequence_id: i32,
    pub comment_author_user_pda: String,
    #[serde(default)]
    pub parent_post_pda: Option<String>,
    #[serde(default)]
    pub parent_post_author_user_pda: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_parsed_vote_to: Option<String>,
    #[serde(default)]
    pub create_transaction_block_time: Option<i64>,
}

impl Comment {
    /// Composite primary key.
    pub fn key(&self) -> (i32, String) {
        (
            self.comment_author_sequence_id,
            self.comment_author_user_pda.clone(),
        )
    }

    /// The vote carried by this comment, if it has a non-empty vote target
    /// and a block time.
    pub fn vote_event(&self) -> Option<VoteEvent> {
        let category = self.content_parsed_vote_to.as_deref()?;
        if category.is_empty() {
            return None;
        }
        let block_time = self.create_transaction_block_time?;
        Some(VoteEvent::new(block_time as f64, category))
    }
}

/// A reaction (like, upvote, downvote, emoji) on a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentReaction {
    pub reaction_author_sequence_id: i32,
    pub reaction_author_user_pda: String,
    #[serde(default)]
    pub parent_post_pda: Option<String>,
    #[serde(default)]
    pub parent_comment_sequence_id: Option<i32>,
    #[serde(default)]
    pub parent_comment_author_user_pda: Option<String>,
    #[serde(default)]
    pub reaction_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub create_transaction_block_time: Option<i64>,
}

impl CommentReaction {
    pub fn key(&self) -> (i32, String) {
        (
            self.reaction_author_sequence_id,
            self.reaction_author_user_pda.clone(),
        )
    }

    pub fn is_like(&self) -> bool {
        self.reaction_type.as_deref() == Some(LIKE_REACTION)
    }
}

/// Reaction type counted by the daily like stats.
pub const LIKE_REACTION: &str = "like";

/// A token reward paid to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub signature: String,
    pub instruction_sequence: i32,
    pub reward_sequence: i32,
    #[serde(default)]
    pub receiver_user_pda: Option<String>,
    #[serde(default)]
    pub amount: Option<i32>,
    #[serde(default, rename = "type")]
    pub reward_type: Option<String>,
    #[serde(default)]
    pub create_transaction_block_time: Option<i64>,
}

impl Reward {
    pub fn key(&self) -> (String, i32, i32) {
        (
            self.signature.clone(),
            self.instruction_sequence,
            self.reward_sequence,
        )
    }
}

/// Kind of per-user activity counted by the daily stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Likes received on the user's comments.
    Likes,
    /// Comments received on the user's posts.
    Comments,
    /// Rewards received by the user.
    Rewards,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Comments => "comments",
            Self::Rewards => "rewards",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "likes" | "like" => Ok(Self::Likes),
            "comments" | "comment" => Ok(Self::Comments),
            "rewards" | "reward" => Ok(Self::Rewards),
            _ => Err(format!("Unknown activity kind: {}", s)),
        }
    }
}
