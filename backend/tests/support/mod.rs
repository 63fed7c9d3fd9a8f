#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Write;
use std::sync::Mutex;

use forum_analytics::models::{Comment, CommentReaction, Reward};
use tempfile::NamedTempFile;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Access to the process environment is serialized across tests and the
/// previous values are restored even if `f` panics.
///
/// `Some(v)` sets a variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::apply(changes);
    f()
}

struct ScopedEnv {
    previous: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let previous = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (key, value) in changes {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }

        Self { previous }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Write `contents` to a temporary `.toml` file kept alive by the handle.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

/// A comment carrying a vote on `post`.
pub fn vote_comment(seq: i32, voter: &str, post: &str, vote_to: &str, block_time: i64) -> Comment {
    Comment {
        comment_author_sequence_id: seq,
        comment_author_user_pda: voter.to_string(),
        parent_post_pda: Some(post.to_string()),
        parent_post_author_user_pda: Some("post-author".to_string()),
        content: Some(format!("I vote {}", vote_to)),
        content_parsed_vote_to: Some(vote_to.to_string()),
        create_transaction_block_time: Some(block_time),
    }
}

/// A reaction of `reaction_type` on a comment written by `comment_author`.
pub fn reaction(
    seq: i32,
    reaction_type: &str,
    comment_author: &str,
    block_time: i64,
) -> CommentReaction {
    CommentReaction {
        reaction_author_sequence_id: seq,
        reaction_author_user_pda: "reactor".to_string(),
        parent_post_pda: Some("post".to_string()),
        parent_comment_sequence_id: Some(1),
        parent_comment_author_user_pda: Some(comment_author.to_string()),
        reaction_type: Some(reaction_type.to_string()),
        content: None,
        create_transaction_block_time: Some(block_time),
    }
}

/// A reward paid to `receiver`.
pub fn reward(seq: i32, receiver: &str, block_time: i64) -> Reward {
    Reward {
        signature: "5igNature".to_string(),
        instruction_sequence: 0,
        reward_sequence: seq,
        receiver_user_pda: Some(receiver.to_string()),
        amount: Some(25),
        reward_type: Some("comment".to_string()),
        create_transaction_block_time: Some(block_time),
    }
}
