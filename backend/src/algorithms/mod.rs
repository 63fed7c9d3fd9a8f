//! Pure aggregation algorithms.
//!
//! Nothing in here touches a store: every function works on an event list
//! already in memory and is deterministic for a given input.
//!
//! # Components
//!
//! - [`bucketing`]: uniform time slots over the span of an event set
//! - [`cumulative`]: dense (slot × vote type) grid with running totals
//! - [`daily`]: zero-filled per-day counts over a trailing window

pub mod bucketing;
pub mod cumulative;
pub mod daily;

pub use bucketing::{validate_divisions, TimeSlot, TimeSlots, MAX_DIVISIONS};
pub use cumulative::{aggregate, compute_vote_trend, distinct_categories, VoteTrendCell};
pub use daily::{daily_counts, trailing_days, window_start, DailyCount, DEFAULT_WINDOW_DAYS};

#[cfg(test)]
#[path = "bucketing_tests.rs"]
mod bucketing_tests;
