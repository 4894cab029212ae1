//! Warp route layer
//!
//! `GET /{year}/{week}` renders the dashboard; `GET /` redirects to the
//! current ISO week. Engine failures become a plain 500 page, never a
//! partially-correct dashboard.

use crate::render;
use chrono::{Datelike, Utc};
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::{StatusCode, Uri};
use warp::reply::Reply;
use warp::Filter;
use weekview_core::WeekEngine;

/// All routes of the service
pub fn routes(
    engine: Arc<WeekEngine>,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let week = warp::get()
        .and(warp::path!(i32 / u32))
        .and(with_engine(engine))
        .and_then(show_week);

    let home = warp::get()
        .and(warp::path::end())
        .map(redirect_to_current_week);

    home.or(week)
}

fn with_engine(
    engine: Arc<WeekEngine>,
) -> impl Filter<Extract = (Arc<WeekEngine>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&engine))
}

async fn show_week(
    year: i32,
    week: u32,
    engine: Arc<WeekEngine>,
) -> Result<impl Reply, Infallible> {
    match engine.render_week(year, week).await {
        Ok(report) => Ok(warp::reply::with_status(
            warp::reply::html(render::week_page(year, week, &report)),
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!(error = %err, year, week, "week render failed");
            Ok(warp::reply::with_status(
                warp::reply::html(render::error_page(&err)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

fn redirect_to_current_week() -> warp::reply::Response {
    let iso = Utc::now().date_naive().iso_week();
    let location = format!("/{}/{}", iso.year(), iso.week());
    match location.parse::<Uri>() {
        Ok(uri) => warp::redirect::found(uri).into_response(),
        Err(err) => {
            tracing::error!(error = %err, location, "could not build redirect target");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
