//! Weekview Server - route layer and bootstrap
//!
//! Maps URLs to (year, week) pairs, invokes the classification engine, and
//! renders the result as a minimal HTML table. Configuration comes from the
//! environment; all failures surface as an error page.

pub mod config;
pub mod render;
pub mod routes;

pub use config::{Config, ConfigError};
pub use routes::routes;
