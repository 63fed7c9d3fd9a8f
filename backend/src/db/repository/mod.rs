//! Repository traits and error types.
//!
//! The store surface is split by concern:
//! - [`ForumRepository`]: health and ingestion of indexed records
//! - [`VoteRepository`]: vote events of one post
//! - [`ActivityRepository`]: per-user activity timestamps
//!
//! [`FullRepository`] bundles the three so a single `Arc<dyn FullRepository>`
//! can be shared across the service layer and the HTTP state.

pub mod activity;
pub mod error;
pub mod forum;
pub mod votes;

pub use activity::ActivityRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult, StoreOperation};
pub use forum::ForumRepository;
pub use votes::VoteRepository;

/// Every repository concern in one trait object.
pub trait FullRepository: ForumRepository + VoteRepository + ActivityRepository {}

impl<T> FullRepository for T where T: ForumRepository + VoteRepository + ActivityRepository {}
