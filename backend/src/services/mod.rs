//! Service layer for the analytics.
//!
//! Services sit between the store and the HTTP API: they validate request
//! parameters, fetch events through the repository traits and run the pure
//! algorithms over them.

pub mod activity;
pub mod vote_trends;

pub use activity::{get_daily_stats, get_daily_stats_today};
pub use vote_trends::{extract_vote_events, get_vote_trends, get_vote_trends_for_posts};


#[cfg(test)]
#[path = "activity_tests.rs"]
mod activity_tests;
