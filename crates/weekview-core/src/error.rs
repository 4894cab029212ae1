//! Error types for the weekly dashboard engine
//!
//! None of these are recovered inside the engine: every variant propagates
//! to the route layer, which turns it into a user-visible failure instead
//! of rendering a partially-correct dashboard.

use crate::model::StoryId;
use crate::tracker::BoxError;

/// Engine error type
#[derive(Debug, thiserror::Error)]
pub enum WeekError {
    /// A tracker request failed (network, status, or decode)
    #[error("tracker request failed: {0}")]
    Transport(#[source] BoxError),

    /// A story has neither a start transition nor an accepted timestamp
    #[error("story {story} has no observable start transition and no accepted timestamp")]
    MissingStartDate {
        /// The offending story
        story: StoryId,
    },

    /// The concurrent augmentation did not complete within the bound
    #[error("story augmentation timed out after {timeout_secs}s")]
    AugmentationTimeout {
        /// The configured bound in seconds
        timeout_secs: u64,
    },

    /// The requested year/week pair does not name a valid ISO week
    #[error("invalid iso week {year}-W{week}")]
    InvalidWeek {
        /// Requested year
        year: i32,
        /// Requested week number
        week: u32,
    },
}

impl WeekError {
    /// Wrap a tracker port failure
    #[inline]
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }

    /// Whether this error originated at the tracker boundary
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
