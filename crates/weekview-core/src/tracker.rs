//! Tracker port
//!
//! The engine talks to the project tracker only through this trait, so the
//! REST backend stays switchable and tests can fake the whole service.

use crate::model::{ActivityEvent, Membership, Story, StoryId};
use async_trait::async_trait;

/// Boxed transport error surfaced by a tracker backend
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Read-only access to the project tracker
///
/// All methods are single authenticated reads with no retry semantics; a
/// failure here aborts the enclosing week render.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Fetch the project's membership list
    async fn memberships(&self) -> Result<Vec<Membership>, BoxError>;

    /// Search stories with the tracker's query language
    async fn search_stories(&self, query: &str) -> Result<Vec<Story>, BoxError>;

    /// Fetch one story's ordered activity log
    async fn story_activity(&self, id: StoryId) -> Result<Vec<ActivityEvent>, BoxError>;
}
