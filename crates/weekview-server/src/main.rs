//! Weekview service entry point

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use weekview_core::WeekEngine;
use weekview_server::{routes, Config};
use weekview_tracker::TrackerClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let default_level = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let tracker = TrackerClient::new(config.project_id, config.api_token.clone());
    let engine = Arc::new(WeekEngine::new(Arc::new(tracker)));

    tracing::info!(
        port = config.port,
        project = config.project_id,
        "weekview listening"
    );
    warp::serve(routes(engine))
        .run(([0, 0, 0, 0], config.port))
        .await;

    Ok(())
}
