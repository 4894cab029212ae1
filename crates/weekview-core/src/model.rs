//! Core types for the weekly dashboard engine
//!
//! Defines the fundamental types of the pipeline:
//! - Identifier newtypes for stories and people
//! - Wire-level story and activity shapes
//! - Augmented stories carrying the resolved start date
//! - Per-owner weekly bucket structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Unique story identifier (the tracker's own integer id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub u64);

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique person identifier (the tracker's own integer id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Story lifecycle state as reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryState {
    /// In the icebox, not yet scheduled
    Unscheduled,
    /// Scheduled but not started
    Unstarted,
    /// Planned for an iteration
    Planned,
    /// Work in progress
    Started,
    /// Development finished
    Finished,
    /// Delivered for review
    Delivered,
    /// Accepted by the reviewer
    Accepted,
    /// Rejected by the reviewer
    Rejected,
}

/// A unit of work as fetched from the tracker's search endpoint
///
/// The raw `started_at` field the tracker reports is not trusted (a story
/// can be started, stopped, and restarted); it is not deserialized here.
/// The authoritative start instant lives on [`AugmentedStory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// Story identifier
    pub id: StoryId,
    /// Display name
    pub name: String,
    /// Link back to the tracker, when provided
    #[serde(default)]
    pub url: Option<String>,
    /// Owning people; may be empty
    #[serde(default)]
    pub owner_ids: Vec<PersonId>,
    /// Current lifecycle state
    pub current_state: StoryState,
    /// Acceptance instant, when the story has been accepted
    #[serde(default)]
    pub accepted_at: Option<DateTime<Utc>>,
}

/// A story stamped with its resolved start date
///
/// Produced exactly once per story by the start-date resolver and immutable
/// afterwards. Multi-owner stories share one instance via [`Arc`].
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedStory {
    /// The story as fetched
    pub story: Story,
    /// First observed transition into the started state (or the accepted
    /// timestamp when no transition was observed)
    pub started_at: DateTime<Utc>,
    /// Whole days elapsed from `started_at` to today's UTC midnight,
    /// floored (a story started later today spans -1); set only for
    /// started or accepted stories
    pub span_days: Option<i64>,
}

impl AugmentedStory {
    /// Story identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> StoryId {
        self.story.id
    }

    /// Owning people
    #[inline]
    #[must_use]
    pub fn owner_ids(&self) -> &[PersonId] {
        &self.story.owner_ids
    }
}

/// One change event from a story's activity log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Event kind reported by the tracker, e.g. `story_update_activity`
    #[serde(default)]
    pub kind: String,
    /// When the event occurred
    pub occurred_at: DateTime<Utc>,
    /// Field-level changes carried by the event
    #[serde(default)]
    pub changes: Vec<StoryChange>,
}

/// A single field-level change inside an activity event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryChange {
    /// Change kind, e.g. `update`
    #[serde(default)]
    pub change_type: String,
    /// Values before the change
    #[serde(default)]
    pub original_values: ChangeValues,
    /// Values after the change
    #[serde(default)]
    pub new_values: ChangeValues,
}

impl StoryChange {
    /// Whether this change moves the story into the started state
    ///
    /// Both the original and the new state must be present; the original
    /// must not already be started.
    #[must_use]
    pub fn is_start_transition(&self) -> bool {
        self.change_type == "update"
            && matches!(self.original_values.current_state, Some(s) if s != StoryState::Started)
            && self.new_values.current_state == Some(StoryState::Started)
    }
}

/// The state-relevant slice of a change's before/after value maps
///
/// The tracker sends arbitrary field maps; only the state and the update
/// instant matter here, everything else is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeValues {
    /// Lifecycle state, when the change touched it
    #[serde(default)]
    pub current_state: Option<StoryState>,
    /// Update instant, when the tracker included one
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A project membership as returned by the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// The member
    pub person: Person,
}

/// A person inside a membership record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Person identifier
    pub id: PersonId,
    /// Full display name
    pub name: String,
}

/// A team member keyed for bucketing and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    /// Person identifier
    pub person_id: PersonId,
    /// Lowercased first word of the display name
    pub first_name_lower: String,
}

impl TeamMember {
    /// Derive a team member from a membership's person record
    #[must_use]
    pub fn from_person(person: &Person) -> Self {
        let first_name_lower = person
            .name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        Self {
            person_id: person.id,
            first_name_lower,
        }
    }
}

/// One team member's weekly buckets
///
/// `days` always holds exactly 7 slots, index 0 = Monday.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryBuckets {
    /// Stories started before the window's Monday
    pub previous_week: Vec<Arc<AugmentedStory>>,
    /// Stories started on or after the window's last day boundary
    pub next_week: Vec<Arc<AugmentedStory>>,
    /// Stories started within the window, by day
    pub days: [Vec<Arc<AugmentedStory>>; 7],
}

impl StoryBuckets {
    /// Total number of story references across all slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.previous_week.len()
            + self.next_week.len()
            + self.days.iter().map(Vec::len).sum::<usize>()
    }

    /// Whether no stories landed in any slot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-member weekly buckets, one entry per fetched team member
pub type BucketedStories = HashMap<PersonId, StoryBuckets>;

/// The fully classified week, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct WeekReport {
    /// Per-member buckets
    pub buckets: BucketedStories,
    /// Display label per day, index 0 = Monday
    pub day_labels: [String; 7],
    /// Display name per known person
    pub user_names: HashMap<PersonId, String>,
}
