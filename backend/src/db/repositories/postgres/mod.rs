//! Diesel store over the indexer tables `comment`, `comment_reaction` and
//! `reward`.
//!
//! Connections come from an r2d2 pool sized by [`PostgresConfig`]. Pending
//! embedded migrations run when the repository is opened. Retryable failures
//! are retried on the blocking pool with exponential backoff.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::upsert::excluded;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::repo_config::PostgresConfig;
use crate::db::repository::{
    ActivityRepository, ForumRepository, RepositoryError, RepositoryResult, StoreOperation,
    VoteRepository,
};
use crate::models::{
    ActivityKind, Comment, CommentReaction, PostPda, Reward, UserPda, VoteEvent, LIKE_REACTION,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    max_retries: u32,
    retry_delay: Duration,
}

impl PostgresRepository {
    /// Build the pool and run pending migrations. Blocks.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_connections))
            .connection_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| RepositoryError::connection(StoreOperation::Connect, e.to_string()))?;

        {
            let mut conn = pool
                .get()
                .map_err(|e| RepositoryError::timeout(StoreOperation::Migrate, e.to_string()))?;
            conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
                RepositoryError::internal(StoreOperation::Migrate, format!("migration failed: {}", e))
            })?;
        }
        log::info!(
            "Postgres repository ready (pool max={}, min={})",
            config.max_connections,
            config.min_connections
        );

        Ok(Self {
            pool,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Run `f` on a pooled connection off the async runtime.
    ///
    /// Checkout failures and errors marked retryable are attempted again up
    /// to `max_retries` times, doubling the delay each time.
    async fn with_conn<T, F>(&self, operation: StoreOperation, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.max_retries;
        let mut delay = self.retry_delay;

        task::spawn_blocking(move || {
            let mut attempt = 0;
            loop {
                let result = pool
                    .get()
                    .map_err(|e| RepositoryError::timeout(operation, e.to_string()))
                    .and_then(|mut conn| f.clone()(&mut conn));

                match result {
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        attempt += 1;
                        log::warn!("{} failed (attempt {}), retrying: {}", operation, attempt, e);
                        std::thread::sleep(delay);
                        delay *= 2;
                    }
                    other => return other,
                }
            }
        })
        .await
        .map_err(|e| RepositoryError::internal(operation, format!("blocking task failed: {}", e)))?
    }
}

#[async_trait]
impl ForumRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(StoreOperation::HealthCheck, |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(|e| RepositoryError::from_diesel(StoreOperation::HealthCheck, e))
        })
        .await
    }

    async fn store_comment(&self, record: &Comment) -> RepositoryResult<()> {
        let row = NewCommentRow::from(record);
        let (seq, author) = record.key();
        let op = StoreOperation::StoreComment;
        self.with_conn(op, move |conn| {
            diesel::insert_into(comment::table)
                .values(&row)
                .on_conflict((
                    comment::comment_author_sequence_id,
                    comment::comment_author_user_pda,
                ))
                .do_update()
                .set((
                    comment::parent_post_pda.eq(excluded(comment::parent_post_pda)),
                    comment::parent_post_author_user_pda
                        .eq(excluded(comment::parent_post_author_user_pda)),
                    comment::content.eq(excluded(comment::content)),
                    comment::content_parsed_vote_to.eq(excluded(comment::content_parsed_vote_to)),
                    comment::create_transaction_block_time
                        .eq(excluded(comment::create_transaction_block_time)),
                    comment::index_updated_at.eq(now),
                ))
                .execute(conn)
                .map(|_| ())
                .map_err(|e| RepositoryError::from_diesel(op, e))
        })
        .await
        .map_err(|e| e.with_key(format!("{}/{}", seq, author)))
    }

    async fn store_reaction(&self, reaction: &CommentReaction) -> RepositoryResult<()> {
        let row = NewCommentReactionRow::from(reaction);
        let (seq, author) = reaction.key();
        let op = StoreOperation::StoreReaction;
        self.with_conn(op, move |conn| {
            diesel::insert_into(comment_reaction::table)
                .values(&row)
                .on_conflict((
                    comment_reaction::reaction_author_sequence_id,
                    comment_reaction::reaction_author_user_pda,
                ))
                .do_update()
                .set((
                    comment_reaction::parent_post_pda
                        .eq(excluded(comment_reaction::parent_post_pda)),
                    comment_reaction::parent_comment_sequence_id
                        .eq(excluded(comment_reaction::parent_comment_sequence_id)),
                    comment_reaction::parent_comment_author_user_pda
                        .eq(excluded(comment_reaction::parent_comment_author_user_pda)),
                    comment_reaction::reaction_type.eq(excluded(comment_reaction::reaction_type)),
                    comment_reaction::content.eq(excluded(comment_reaction::content)),
                    comment_reaction::create_transaction_block_time
                        .eq(excluded(comment_reaction::create_transaction_block_time)),
                    comment_reaction::index_updated_at.eq(now),
                ))
                .execute(conn)
                .map(|_| ())
                .map_err(|e| RepositoryError::from_diesel(op, e))
        })
        .await
        .map_err(|e| e.with_key(format!("{}/{}", seq, author)))
    }

    async fn store_reward(&self, record: &Reward) -> RepositoryResult<()> {
        let row = NewRewardRow::from(record);
        let (signature, instruction, sequence) = record.key();
        let op = StoreOperation::StoreReward;
        self.with_conn(op, move |conn| {
            diesel::insert_into(reward::table)
                .values(&row)
                .on_conflict((
                    reward::signature,
                    reward::instruction_sequence,
                    reward::reward_sequence,
                ))
                .do_update()
                .set((
                    reward::receiver_user_pda.eq(excluded(reward::receiver_user_pda)),
                    reward::amount.eq(excluded(reward::amount)),
                    reward::reward_type.eq(excluded(reward::reward_type)),
                    reward::create_transaction_block_time
                        .eq(excluded(reward::create_transaction_block_time)),
                    reward::index_updated_at.eq(now),
                ))
                .execute(conn)
                .map(|_| ())
                .map_err(|e| RepositoryError::from_diesel(op, e))
        })
        .await
        .map_err(|e| e.with_key(format!("{}/{}/{}", signature, instruction, sequence)))
    }
}

#[async_trait]
impl VoteRepository for PostgresRepository {
    async fn fetch_vote_events(&self, post_pda: &PostPda) -> RepositoryResult<Vec<VoteEvent>> {
        let post = post_pda.as_str().to_string();
        let op = StoreOperation::FetchVoteEvents;
        let rows = self
            .with_conn(op, move |conn| {
                comment::table
                    .filter(comment::parent_post_pda.eq(&post))
                    .filter(comment::content_parsed_vote_to.is_not_null())
                    .filter(comment::content_parsed_vote_to.ne(""))
                    .filter(comment::create_transaction_block_time.is_not_null())
                    .order(comment::create_transaction_block_time.asc())
                    .select(VoteRow::as_select())
                    .load::<VoteRow>(conn)
                    .map_err(|e| RepositoryError::from_diesel(op, e))
            })
            .await
            .map_err(|e| e.with_key(post_pda))?;

        Ok(rows.into_iter().filter_map(VoteRow::into_event).collect())
    }
}

#[async_trait]
impl ActivityRepository for PostgresRepository {
    async fn fetch_activity_timestamps(
        &self,
        kind: ActivityKind,
        user_pda: &UserPda,
        since: i64,
    ) -> RepositoryResult<Vec<i64>> {
        let user = user_pda.as_str().to_string();
        let op = StoreOperation::FetchActivity(kind);
        let times = self
            .with_conn(op, move |conn| {
                let loaded = match kind {
                    ActivityKind::Likes => comment_reaction::table
                        .filter(comment_reaction::reaction_type.eq(LIKE_REACTION))
                        .filter(comment_reaction::parent_comment_author_user_pda.eq(&user))
                        .filter(comment_reaction::create_transaction_block_time.ge(since))
                        .select(comment_reaction::create_transaction_block_time)
                        .load::<Option<i64>>(conn),
                    ActivityKind::Comments => comment::table
                        .filter(comment::parent_post_author_user_pda.eq(&user))
                        .filter(comment::create_transaction_block_time.ge(since))
                        .select(comment::create_transaction_block_time)
                        .load::<Option<i64>>(conn),
                    ActivityKind::Rewards => reward::table
                        .filter(reward::receiver_user_pda.eq(&user))
                        .filter(reward::create_transaction_block_time.ge(since))
                        .select(reward::create_transaction_block_time)
                        .load::<Option<i64>>(conn),
                };
                loaded.map_err(|e| RepositoryError::from_diesel(op, e))
            })
            .await
            .map_err(|e| e.with_key(user_pda))?;

        Ok(times.into_iter().flatten().collect())
    }
}
