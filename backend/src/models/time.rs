//! Conversions between on-chain block times and calendar types.
//!
//! Block times are stored as Unix seconds. Vote trend slots can fall between
//! whole seconds, so the slot helpers work on `f64`.

use chrono::{DateTime, NaiveDate, Utc};

/// Convert fractional Unix seconds into a UTC datetime.
///
/// Values that chrono cannot represent collapse to the Unix epoch.
pub fn datetime_from_unix_seconds(secs: f64) -> DateTime<Utc> {
    if !secs.is_finite() {
        return DateTime::UNIX_EPOCH;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Calendar day (UTC) a block time falls on.
pub fn utc_day_of(block_time: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(block_time, 0).map(|dt| dt.date_naive())
}

/// Unix seconds of 00:00:00 UTC on `day`.
pub fn start_of_day(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc().timestamp())
        .unwrap_or_default()
}
