//! Start-date resolution
//!
//! The tracker's own "started at" field is unreliable: a story can be
//! started, stopped, and restarted. The resolver scans the story's activity
//! log for the *first* transition into the started state (earliest
//! engagement policy) and falls back to the accepted timestamp when no
//! transition is observable in the fetched window.

use crate::error::WeekError;
use crate::model::{ActivityEvent, AugmentedStory, Story, StoryState};
use crate::tracker::Tracker;
use chrono::{DateTime, Utc};

/// Resolves a story's authoritative start instant from its activity log
#[derive(Clone, Copy)]
pub struct StartDateResolver<'a> {
    tracker: &'a dyn Tracker,
    today: DateTime<Utc>,
}

impl<'a> StartDateResolver<'a> {
    /// Create a resolver; `today` must be a UTC midnight
    #[inline]
    #[must_use]
    pub fn new(tracker: &'a dyn Tracker, today: DateTime<Utc>) -> Self {
        Self { tracker, today }
    }

    /// Resolve one story's start date and elapsed span
    ///
    /// # Errors
    /// - `WeekError::Transport` when the activity fetch fails
    /// - `WeekError::MissingStartDate` when the story has neither a start
    ///   transition nor an accepted timestamp
    pub async fn resolve(&self, story: Story) -> Result<AugmentedStory, WeekError> {
        let activity = self
            .tracker
            .story_activity(story.id)
            .await
            .map_err(WeekError::Transport)?;

        let started_at = match first_start_transition(&activity) {
            Some(instant) => instant,
            None => story
                .accepted_at
                .ok_or(WeekError::MissingStartDate { story: story.id })?,
        };
        tracing::debug!(story = %story.id, %started_at, "resolved start date");

        // Floored, not truncated: a story started later today spans -1 days
        let span_days = matches!(
            story.current_state,
            StoryState::Started | StoryState::Accepted
        )
        .then(|| (self.today - started_at).num_seconds().div_euclid(86_400));

        Ok(AugmentedStory {
            story,
            started_at,
            span_days,
        })
    }
}

/// The instant of the first observed not-started -> started transition
///
/// Later stop/restart cycles never override the first match; the scan stops
/// outright. The transition instant comes from the change's `updated_at`
/// when the tracker included one, else from the event itself.
fn first_start_transition(events: &[ActivityEvent]) -> Option<DateTime<Utc>> {
    for event in events {
        for change in &event.changes {
            if change.is_start_transition() {
                return Some(change.new_values.updated_at.unwrap_or(event.occurred_at));
            }
        }
    }
    None
}
