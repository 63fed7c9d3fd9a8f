//! Daily activity statistics of a user.

use chrono::{NaiveDate, Utc};

use crate::algorithms::{daily_counts, window_start};
use crate::db::repository::ActivityRepository;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{ActivityKind, UserPda};
use crate::routes::activity::{DailyStat, DailyStatsData};

/// Per-day count of the `kind` activity received by `user_pda` over the
/// `days` calendar days ending at `today` (UTC), newest first, zero-filled.
///
/// # Errors
/// * `InvalidArgument` if `days == 0` or `user_pda` is empty
/// * `StoreFailure` if the activity cannot be read
pub async fn get_daily_stats<R: ActivityRepository + ?Sized>(
    repo: &R,
    kind: ActivityKind,
    user_pda: &UserPda,
    today: NaiveDate,
    days: u32,
) -> AnalyticsResult<DailyStatsData> {
    if days == 0 {
        return Err(AnalyticsError::invalid_argument(
            "activity window must span at least one day",
        ));
    }
    if user_pda.is_empty() {
        return Err(AnalyticsError::invalid_argument("user_pda must not be empty"));
    }

    let since = window_start(today, days);
    let timestamps = repo.fetch_activity_timestamps(kind, user_pda, since).await?;
    log::debug!(
        "Daily {} stats for {}: {} events since {}",
        kind,
        user_pda,
        timestamps.len(),
        since
    );

    Ok(DailyStatsData {
        user_pda: user_pda.clone(),
        kind,
        days: daily_counts(&timestamps, today, days)
            .into_iter()
            .map(DailyStat::from)
            .collect(),
    })
}

/// [`get_daily_stats`] with the window ending on the current UTC day.
pub async fn get_daily_stats_today<R: ActivityRepository + ?Sized>(
    repo: &R,
    kind: ActivityKind,
    user_pda: &UserPda,
    days: u32,
) -> AnalyticsResult<DailyStatsData> {
    let today = Utc::now().date_naive();
    get_daily_stats(repo, kind, user_pda, today, days).await
}
