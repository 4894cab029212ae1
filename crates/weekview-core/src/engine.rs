//! The week rendering pipeline
//!
//! One engine instance serves many requests; everything request-scoped
//! (window, members, stories) lives in locals threaded through the stages,
//! never on the engine itself.
//!
//! # Workflow
//! 1. Build the ISO week window
//! 2. Fetch the membership list
//! 3. Search stories matching the window's query
//! 4. Resolve every story's start date concurrently
//! 5. Bucket per owner and day

use crate::augment::{AugmentConfig, ConcurrentAugmenter};
use crate::bucket::WeekBucketer;
use crate::error::WeekError;
use crate::model::{PersonId, TeamMember, WeekReport};
use crate::resolver::StartDateResolver;
use crate::tracker::Tracker;
use crate::window::WeekWindow;
use std::collections::HashMap;
use std::sync::Arc;

/// Renders weekly dashboards from tracker data
pub struct WeekEngine {
    tracker: Arc<dyn Tracker>,
    augment: AugmentConfig,
}

impl WeekEngine {
    /// Create an engine over a tracker backend
    #[inline]
    #[must_use]
    pub fn new(tracker: Arc<dyn Tracker>) -> Self {
        Self {
            tracker,
            augment: AugmentConfig::default(),
        }
    }

    /// With different augmentation bounds
    #[inline]
    #[must_use]
    pub fn with_augment_config(mut self, config: AugmentConfig) -> Self {
        self.augment = config;
        self
    }

    /// Render the dashboard for an ISO (year, week) pair
    ///
    /// # Errors
    /// - `WeekError::InvalidWeek` for an unmappable year/week pair
    /// - `WeekError::Transport` when any tracker fetch fails
    /// - `WeekError::MissingStartDate` for a story with no resolvable start
    /// - `WeekError::AugmentationTimeout` when resolution misses the bound
    pub async fn render_week(&self, year: i32, week: u32) -> Result<WeekReport, WeekError> {
        let window = WeekWindow::from_iso_week(year, week)?;
        self.render_window(&window).await
    }

    /// Render the dashboard for a prebuilt window
    ///
    /// # Errors
    /// Same as [`Self::render_week`], minus the window validation.
    pub async fn render_window(&self, window: &WeekWindow) -> Result<WeekReport, WeekError> {
        tracing::info!(
            monday = %window.monday().date_naive(),
            current = window.is_current_week(),
            "rendering week"
        );

        let memberships = self
            .tracker
            .memberships()
            .await
            .map_err(WeekError::Transport)?;
        let members: Vec<TeamMember> = memberships
            .iter()
            .map(|membership| TeamMember::from_person(&membership.person))
            .collect();
        let user_names: HashMap<PersonId, String> = members
            .iter()
            .map(|member| (member.person_id, member.first_name_lower.clone()))
            .collect();
        tracing::debug!(members = members.len(), "fetched memberships");

        let query = window.build_query();
        tracing::debug!(%query, "searching stories");
        let stories = self
            .tracker
            .search_stories(&query)
            .await
            .map_err(WeekError::Transport)?;
        tracing::info!(stories = stories.len(), "fetched story set");

        let resolver = StartDateResolver::new(self.tracker.as_ref(), window.today());
        let augmenter = ConcurrentAugmenter::new(resolver, self.augment);
        let augmented = augmenter.augment_all(stories).await?;

        let buckets = WeekBucketer::new(window).organize(&augmented, &members);

        Ok(WeekReport {
            buckets,
            day_labels: window.day_labels(),
            user_names,
        })
    }
}
