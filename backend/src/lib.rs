//! # Forum Analytics Backend
//!
//! Time-series analytics over indexed forum activity.
//!
//! The core of the crate is the vote trend engine: the votes cast on a post
//! are binned into N uniform time slots, counted per vote type on a dense
//! (slot × vote type) grid and accumulated into running totals. Around it sit
//! the per-user daily activity statistics, the store backends the events are
//! read from and an HTTP API.
//!
//! ## Architecture
//!
//! - [`algorithms`]: pure bucketing, grid filling and daily counting
//! - [`models`]: forum records, vote events and identifier newtypes
//! - [`db`]: repository traits, in-memory and Postgres backends, configuration
//! - [`services`]: store-backed vote trends and daily stats
//! - [`routes`] / [`api`]: serializable response types
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`error`]: analytics error type

// RepositoryError carries rich context for debugging.
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{AnalyticsError, AnalyticsResult};
