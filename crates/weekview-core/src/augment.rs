//! Concurrent story augmentation
//!
//! Fans one resolution future out per story, drives them concurrently, and
//! joins before returning. The join is the pipeline's single
//! synchronization point: bucketing never sees a story without a resolved
//! start date. On timeout or any resolution failure the whole augmentation
//! aborts; partial results never escape.

use crate::error::WeekError;
use crate::model::{AugmentedStory, Story};
use crate::resolver::StartDateResolver;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

/// Bounds for the augmentation fan-out
#[derive(Debug, Clone, Copy)]
pub struct AugmentConfig {
    /// Maximum resolutions in flight at once
    pub max_in_flight: usize,
    /// Global bound on the whole join
    pub timeout: Duration,
}

impl AugmentConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a different in-flight cap
    #[inline]
    #[must_use]
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max;
        self
    }

    /// With a different global timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 16,
            timeout: Duration::from_secs(100),
        }
    }
}

/// Drives start-date resolution for a whole story set
pub struct ConcurrentAugmenter<'a> {
    resolver: StartDateResolver<'a>,
    config: AugmentConfig,
}

impl<'a> ConcurrentAugmenter<'a> {
    /// Create an augmenter over a resolver
    #[inline]
    #[must_use]
    pub fn new(resolver: StartDateResolver<'a>, config: AugmentConfig) -> Self {
        Self { resolver, config }
    }

    /// Resolve every story concurrently and join
    ///
    /// Resolutions are independent and may complete in any order; the
    /// returned vector follows the input order regardless.
    ///
    /// # Errors
    /// - `WeekError::AugmentationTimeout` when the join misses the bound
    /// - the first resolution error otherwise
    pub async fn augment_all(
        &self,
        stories: Vec<Story>,
    ) -> Result<Vec<Arc<AugmentedStory>>, WeekError> {
        if stories.is_empty() {
            return Ok(Vec::new());
        }
        let total = stories.len();
        tracing::debug!(total, "augmenting stories");

        let resolver = self.resolver;
        let resolutions = stream::iter(
            stories
                .into_iter()
                .map(move |story| async move { resolver.resolve(story).await }),
        )
        .buffered(self.config.max_in_flight)
        .collect::<Vec<_>>();

        let results = tokio::time::timeout(self.config.timeout, resolutions)
            .await
            .map_err(|_| WeekError::AugmentationTimeout {
                timeout_secs: self.config.timeout.as_secs(),
            })?;

        let augmented = results
            .into_iter()
            .map(|result| result.map(Arc::new))
            .collect::<Result<Vec<_>, WeekError>>()?;
        tracing::debug!(total, "augmentation complete");
        Ok(augmented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ActivityEvent, ChangeValues, Membership, StoryChange, StoryId, StoryState,
    };
    use crate::tracker::{BoxError, MockTracker, Tracker};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn story(id: u64) -> Story {
        Story {
            id: StoryId(id),
            name: format!("story {id}"),
            url: None,
            owner_ids: vec![],
            current_state: StoryState::Started,
            accepted_at: None,
        }
    }

    fn start_event(at: DateTime<Utc>) -> ActivityEvent {
        ActivityEvent {
            kind: "story_update_activity".to_string(),
            occurred_at: at,
            changes: vec![StoryChange {
                change_type: "update".to_string(),
                original_values: ChangeValues {
                    current_state: Some(StoryState::Unstarted),
                    updated_at: None,
                },
                new_values: ChangeValues {
                    current_state: Some(StoryState::Started),
                    updated_at: Some(at),
                },
            }],
        }
    }

    /// Tracker stub whose activity fetches never complete in real time
    struct StalledTracker;

    #[async_trait]
    impl Tracker for StalledTracker {
        async fn memberships(&self) -> Result<Vec<Membership>, BoxError> {
            Ok(vec![])
        }

        async fn search_stories(&self, _query: &str) -> Result<Vec<Story>, BoxError> {
            Ok(vec![])
        }

        async fn story_activity(&self, _id: StoryId) -> Result<Vec<ActivityEvent>, BoxError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn augments_every_story_in_input_order() {
        let mut tracker = MockTracker::new();
        tracker.expect_story_activity().returning(|id| {
            // Each story started on a distinct day derived from its id
            Ok(vec![start_event(utc(2024, 3, id.0 as u32, 9))])
        });
        let resolver = StartDateResolver::new(&tracker, utc(2024, 3, 9, 0));
        let augmenter = ConcurrentAugmenter::new(resolver, AugmentConfig::default());

        let augmented = augmenter
            .augment_all(vec![story(4), story(5), story(6)])
            .await
            .unwrap();

        let ids: Vec<StoryId> = augmented.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![StoryId(4), StoryId(5), StoryId(6)]);
        assert_eq!(augmented[1].started_at, utc(2024, 3, 5, 9));
    }

    #[tokio::test]
    async fn empty_input_resolves_immediately() {
        let tracker = MockTracker::new();
        let resolver = StartDateResolver::new(&tracker, utc(2024, 3, 9, 0));
        let augmenter = ConcurrentAugmenter::new(resolver, AugmentConfig::default());

        let augmented = augmenter.augment_all(vec![]).await.unwrap();
        assert!(augmented.is_empty());
    }

    #[tokio::test]
    async fn single_resolution_failure_aborts_the_batch() {
        let mut tracker = MockTracker::new();
        tracker.expect_story_activity().returning(|id| {
            if id == StoryId(5) {
                Err(std::io::Error::other("connection reset").into())
            } else {
                Ok(vec![start_event(utc(2024, 3, 4, 9))])
            }
        });
        let resolver = StartDateResolver::new(&tracker, utc(2024, 3, 9, 0));
        let augmenter = ConcurrentAugmenter::new(resolver, AugmentConfig::default());

        let err = augmenter
            .augment_all(vec![story(4), story(5)])
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test(start_paused = true)]
    async fn join_is_bounded_by_the_global_timeout() {
        let tracker = StalledTracker;
        let resolver = StartDateResolver::new(&tracker, utc(2024, 3, 9, 0));
        let config = AugmentConfig::new().with_timeout(Duration::from_secs(100));
        let augmenter = ConcurrentAugmenter::new(resolver, config);

        let err = augmenter.augment_all(vec![story(1)]).await.unwrap_err();
        assert!(matches!(
            err,
            WeekError::AugmentationTimeout { timeout_secs: 100 }
        ));
    }

    #[tokio::test]
    async fn in_flight_cap_still_resolves_everything() {
        let mut tracker = MockTracker::new();
        tracker
            .expect_story_activity()
            .returning(|_| Ok(vec![start_event(utc(2024, 3, 4, 9))]));
        let resolver = StartDateResolver::new(&tracker, utc(2024, 3, 9, 0));
        let config = AugmentConfig::new().with_max_in_flight(2);
        let augmenter = ConcurrentAugmenter::new(resolver, config);

        let stories = (1..=9).map(story).collect();
        let augmented = augmenter.augment_all(stories).await.unwrap();
        assert_eq!(augmented.len(), 9);
    }
}
