//! Weekly bucketing
//!
//! Partitions augmented stories by owner, then by day-of-week relative to
//! the window's Monday, with previous-week and next-week overflow slots.
//! Bucketing only runs after augmentation has fully joined, so every story
//! here carries a resolved start date.

use crate::model::{AugmentedStory, BucketedStories, StoryBuckets, TeamMember};
use crate::window::WeekWindow;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The slot a story lands in within one owner's week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Started before the window's Monday
    PreviousWeek,
    /// Started within the window; 0 = Monday
    Day(usize),
    /// Started on or after the window's last day boundary
    NextWeek,
}

/// Buckets augmented stories per owner and day
#[derive(Debug, Clone, Copy)]
pub struct WeekBucketer<'a> {
    window: &'a WeekWindow,
}

impl<'a> WeekBucketer<'a> {
    /// Create a bucketer for one window
    #[inline]
    #[must_use]
    pub fn new(window: &'a WeekWindow) -> Self {
        Self { window }
    }

    /// Classify a start instant against the window's day boundaries
    ///
    /// Instants at or past the last boundary (the window's Sunday) fall
    /// into the next-week slot; the six inner boundaries are scanned in
    /// order and the first one strictly greater than the instant wins.
    #[must_use]
    pub fn slot_for(&self, started_at: DateTime<Utc>) -> Slot {
        let days = self.window.days();
        if started_at < days[0] {
            return Slot::PreviousWeek;
        }
        for (index, boundary) in days[1..].iter().enumerate() {
            if started_at < *boundary {
                return Slot::Day(index);
            }
        }
        Slot::NextWeek
    }

    /// Fan every story out into its owners' buckets
    ///
    /// One empty bucket set is initialized per team member up front.
    /// Owners absent from the member list are dropped for that owner only;
    /// a story with no known owners disappears from the output entirely.
    /// Multi-owner stories are shared by reference, not copied.
    #[must_use]
    pub fn organize(
        &self,
        stories: &[Arc<AugmentedStory>],
        members: &[TeamMember],
    ) -> BucketedStories {
        let mut buckets: BucketedStories = members
            .iter()
            .map(|member| (member.person_id, StoryBuckets::default()))
            .collect();

        for story in stories {
            let slot = self.slot_for(story.started_at);
            for owner in story.owner_ids() {
                let Some(member_buckets) = buckets.get_mut(owner) else {
                    tracing::debug!(story = %story.id(), %owner, "owner not in team, dropped");
                    continue;
                };
                let target = match slot {
                    Slot::PreviousWeek => &mut member_buckets.previous_week,
                    Slot::Day(index) => &mut member_buckets.days[index],
                    Slot::NextWeek => &mut member_buckets.next_week,
                };
                target.push(Arc::clone(story));
            }
        }

        buckets
    }
}
