//! Weekview Core - story classification engine
//!
//! Turns a tracker's raw story set into a weekly per-owner dashboard:
//! - Resolves each story's true start date from its change history
//! - Fans resolution out concurrently and joins before bucketing
//! - Buckets stories per owner into day-of-week and overflow slots
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use weekview_core::WeekEngine;
//!
//! # async fn example(tracker: Arc<dyn weekview_core::Tracker>) -> Result<(), Box<dyn std::error::Error>> {
//! let engine = WeekEngine::new(tracker);
//! let report = engine.render_week(2024, 10).await?;
//!
//! println!("bucketed for {} people", report.buckets.len());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod augment;
pub mod bucket;
pub mod engine;
pub mod error;
pub mod model;
pub mod resolver;
pub mod tracker;
pub mod window;

// Re-exports for convenience
pub use augment::{AugmentConfig, ConcurrentAugmenter};
pub use bucket::{Slot, WeekBucketer};
pub use engine::WeekEngine;
pub use error::WeekError;
pub use model::{
    ActivityEvent, AugmentedStory, BucketedStories, ChangeValues, Membership, Person, PersonId,
    Story, StoryBuckets, StoryChange, StoryId, StoryState, TeamMember, WeekReport,
};
pub use resolver::StartDateResolver;
pub use tracker::{BoxError, Tracker};
pub use window::WeekWindow;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
