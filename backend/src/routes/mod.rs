//! Serializable response types of the analytics endpoints.

pub mod activity;
pub mod vote_trends;
