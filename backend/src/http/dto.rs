//! Data Transfer Objects for the HTTP API.
//!
//! Response payloads are the serializable types of the routes module; this
//! file adds the request shapes and the small envelopes around them.

use serde::{Deserialize, Serialize};

pub use crate::api::{DailyStat, DailyStatsData, VoteTrendData, VoteTrendRow};
use crate::models::PostPda;

/// Query parameters for the vote trend endpoint.
///
/// `divisions` is signed so out-of-range values reach the handler and get a
/// JSON error instead of a bare extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteTrendsQuery {
    pub divisions: Option<i64>,
}

/// Request body for the batch vote trend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVoteTrendsRequest {
    pub post_pdas: Vec<PostPda>,
    #[serde(default)]
    pub divisions: Option<i64>,
}

/// Response for the batch vote trend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVoteTrendsResponse {
    /// One trend per requested post, in request order
    pub trends: Vec<VoteTrendData>,
    pub total: usize,
}

/// Acknowledgement of an ingested record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Record type ("comment", "reaction", "reward")
    pub entity: String,
    /// Composite key of the stored record, `/`-joined
    pub key: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Store status ("connected", "disconnected" or an error message)
    pub database: String,
}
