//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    BatchVoteTrendsRequest, BatchVoteTrendsResponse, DailyStatsData, HealthResponse,
    IngestResponse, VoteTrendData, VoteTrendsQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::db::AnalyticsSettings;
use crate::models::{ActivityKind, Comment, CommentReaction, PostPda, Reward, UserPda};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Resolve the requested slot count against the configured limits.
pub fn resolve_divisions(
    settings: &AnalyticsSettings,
    requested: Option<i64>,
) -> Result<usize, AppError> {
    let Some(requested) = requested else {
        return Ok(settings.default_divisions);
    };
    if requested < 1 {
        return Err(AppError::BadRequest(format!(
            "divisions must be at least 1, got {}",
            requested
        )));
    }
    match usize::try_from(requested) {
        Ok(n) if n <= settings.max_divisions => Ok(n),
        _ => Err(AppError::BadRequest(format!(
            "divisions must be at most {}, got {}",
            settings.max_divisions, requested
        ))),
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Vote Trends
// =============================================================================

/// GET /v1/posts/{post_pda}/vote-trends?divisions=N
pub async fn get_vote_trends(
    State(state): State<AppState>,
    Path(post_pda): Path<String>,
    Query(query): Query<VoteTrendsQuery>,
) -> HandlerResult<VoteTrendData> {
    let divisions = resolve_divisions(&state.analytics, query.divisions)?;
    let post_pda = PostPda::new(post_pda);
    tracing::debug!(%post_pda, divisions, "vote trend requested");

    let data = services::get_vote_trends(state.repository.as_ref(), &post_pda, divisions).await?;
    Ok(Json(data))
}

/// POST /v1/vote-trends
pub async fn get_vote_trends_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchVoteTrendsRequest>,
) -> HandlerResult<BatchVoteTrendsResponse> {
    let divisions = resolve_divisions(&state.analytics, request.divisions)?;
    if request.post_pdas.is_empty() {
        return Err(AppError::BadRequest("post_pdas must not be empty".to_string()));
    }

    let trends = services::get_vote_trends_for_posts(
        state.repository.as_ref(),
        &request.post_pdas,
        divisions,
    )
    .await?;
    let total = trends.len();
    Ok(Json(BatchVoteTrendsResponse { trends, total }))
}

// =============================================================================
// Daily Activity Stats
// =============================================================================

/// GET /v1/users/{user_pda}/stats/{kind}
pub async fn get_daily_stats(
    State(state): State<AppState>,
    Path((user_pda, kind)): Path<(String, String)>,
) -> HandlerResult<DailyStatsData> {
    let kind: ActivityKind = kind.parse().map_err(AppError::BadRequest)?;
    let user_pda = UserPda::new(user_pda);

    let data = services::get_daily_stats_today(
        state.repository.as_ref(),
        kind,
        &user_pda,
        state.analytics.activity_window_days,
    )
    .await?;
    Ok(Json(data))
}

// =============================================================================
// Ingestion
// =============================================================================

/// POST /v1/comments
pub async fn store_comment(
    State(state): State<AppState>,
    Json(comment): Json<Comment>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    db_services::store_comment(state.repository.as_ref(), &comment).await?;
    let (seq, author) = comment.key();
    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            entity: "comment".to_string(),
            key: format!("{}/{}", seq, author),
        }),
    ))
}

/// POST /v1/reactions
pub async fn store_reaction(
    State(state): State<AppState>,
    Json(reaction): Json<CommentReaction>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    db_services::store_reaction(state.repository.as_ref(), &reaction).await?;
    let (seq, author) = reaction.key();
    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            entity: "reaction".to_string(),
            key: format!("{}/{}", seq, author),
        }),
    ))
}

/// POST /v1/rewards
pub async fn store_reward(
    State(state): State<AppState>,
    Json(reward): Json<Reward>,
) -> Result<(StatusCode, Json<IngestResponse>), AppError> {
    db_services::store_reward(state.repository.as_ref(), &reward).await?;
    let (signature, instruction, sequence) = reward.key();
    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            entity: "reward".to_string(),
            key: format!("{}/{}/{}", signature, instruction, sequence),
        }),
    ))
}
