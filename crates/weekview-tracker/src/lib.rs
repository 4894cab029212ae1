//! Weekview Tracker - REST backend for the weekview engine
//!
//! Implements the core's [`weekview_core::Tracker`] port against a
//! Pivotal-Tracker-style project API: authenticated project-scoped GETs,
//! typed JSON decoding, and nothing else (no retries, no writes).

pub mod client;
pub mod error;

pub use client::{TrackerClient, DEFAULT_BASE_URL};
pub use error::TransportError;
