use diesel::prelude::*;

use super::schema::{comment, comment_reaction, reward};
use crate::models::{Comment, CommentReaction, Reward, VoteEvent};

/// The two columns the vote trend analysis reads from a comment.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct VoteRow {
    pub content_parsed_vote_to: Option<String>,
    pub create_transaction_block_time: Option<i64>,
}

impl VoteRow {
    pub fn into_event(self) -> Option<VoteEvent> {
        let category = self.content_parsed_vote_to.filter(|c| !c.is_empty())?;
        let block_time = self.create_transaction_block_time?;
        Some(VoteEvent::new(block_time as f64, category))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comment)]
pub struct NewCommentRow {
    pub comment_author_sequence_id: i32,
    pub comment_author_user_pda: String,
    pub parent_post_pda: Option<String>,
    pub parent_post_author_user_pda: Option<String>,
    pub content: Option<String>,
    pub content_parsed_vote_to: Option<String>,
    pub create_transaction_block_time: Option<i64>,
}

impl From<&Comment> for NewCommentRow {
    fn from(c: &Comment) -> Self {
        Self {
            comment_author_sequence_id: c.comment_author_sequence_id,
            comment_author_user_pda: c.comment_author_user_pda.clone(),
            parent_post_pda: c.parent_post_pda.clone(),
            parent_post_author_user_pda: c.parent_post_author_user_pda.clone(),
            content: c.content.clone(),
            content_parsed_vote_to: c.content_parsed_vote_to.clone(),
            create_transaction_block_time: c.create_transaction_block_time,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comment_reaction)]
pub struct NewCommentReactionRow {
    pub reaction_author_sequence_id: i32,
    pub reaction_author_user_pda: String,
    pub parent_post_pda: Option<String>,
    pub parent_comment_sequence_id: Option<i32>,
    pub parent_comment_author_user_pda: Option<String>,
    pub reaction_type: Option<String>,
    pub content: Option<String>,
    pub create_transaction_block_time: Option<i64>,
}

impl From<&CommentReaction> for NewCommentReactionRow {
    fn from(r: &CommentReaction) -> Self {
        Self {
            reaction_author_sequence_id: r.reaction_author_sequence_id,
            reaction_author_user_pda: r.reaction_author_user_pda.clone(),
            parent_post_pda: r.parent_post_pda.clone(),
            parent_comment_sequence_id: r.parent_comment_sequence_id,
            parent_comment_author_user_pda: r.parent_comment_author_user_pda.clone(),
            reaction_type: r.reaction_type.clone(),
            content: r.content.clone(),
            create_transaction_block_time: r.create_transaction_block_time,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reward)]
pub struct NewRewardRow {
    pub signature: String,
    pub instruction_sequence: i32,
    pub reward_sequence: i32,
    pub receiver_user_pda: Option<String>,
    pub amount: Option<i32>,
    pub reward_type: Option<String>,
    pub create_transaction_block_time: Option<i64>,
}

impl From<&Reward> for NewRewardRow {
    fn from(r: &Reward) -> Self {
        Self {
            signature: r.signature.clone(),
            instruction_sequence: r.instruction_sequence,
            reward_sequence: r.reward_sequence,
            receiver_user_pda: r.receiver_user_pda.clone(),
            amount: r.amount,
            reward_type: r.reward_type.clone(),
            create_transaction_block_time: r.create_transaction_block_time,
        }
    }
}
