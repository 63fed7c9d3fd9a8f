//! Per-day event counts over a trailing window of calendar days.
//!
//! Days are UTC calendar dates. The window ends at (and includes) `today` and
//! every day in it is reported, zero-filled, newest first.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::time::{start_of_day, utc_day_of};

/// Default length of the activity window.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Number of events on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: u64,
}

/// The `days` calendar days ending at `today`, newest first.
pub fn trailing_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .collect()
}

/// Unix seconds of midnight UTC on the oldest day of the window.
pub fn window_start(today: NaiveDate, days: u32) -> i64 {
    let oldest = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    start_of_day(oldest)
}

/// Count `timestamps` per UTC day over the window ending at `today`.
///
/// Timestamps outside the window are ignored. The result has exactly one
/// entry per day of the window.
pub fn daily_counts(timestamps: &[i64], today: NaiveDate, days: u32) -> Vec<DailyCount> {
    let window = trailing_days(today, days);
    let mut per_day: HashMap<NaiveDate, u64> = window.iter().map(|d| (*d, 0)).collect();

    for ts in timestamps {
        if let Some(day) = utc_day_of(*ts) {
            if let Some(count) = per_day.get_mut(&day) {
                *count += 1;
            }
        }
    }

    window
        .into_iter()
        .map(|day| DailyCount {
            day,
            count: per_day.get(&day).copied().unwrap_or(0),
        })
        .collect()
}
