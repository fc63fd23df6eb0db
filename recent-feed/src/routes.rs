use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::{
    csp::csp_layer,
    error::AppError,
    state::AppState,
    types::{FeedError, PageWindow},
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/recentEntries", get(recent_entries_handler))
        .route("/api/entries/:username", get(entries_handler))
        .layer(cors)
        .layer(csp_layer())
        .with_state(state)
}

/// `GET /api/recentEntries?start=<int>&limit=<int>`
pub async fn recent_entries_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    // Parameters are checked before any storage access.
    let window = PageWindow::parse(
        params.get("start").map(String::as_str),
        params.get("limit").map(String::as_str),
        state.config.default_page_size,
    )
    .map_err(FeedError::from)?;

    let items = state.aggregator.build_feed(window).await?;
    json_response(&items)
}

/// `GET /api/entries/:username`
pub async fn entries_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    let entries = state.datastore.get_entries(&username).await.map_err(|e| {
        error!("Failed to retrieve entries for {}: {:#}", username, e);
        AppError::EntriesUnavailable(username.clone())
    })?;

    info!("Serving {} entries for {}", entries.len(), username);
    json_response(&entries)
}

fn json_response<T: Serialize>(body: &T) -> Result<Response, AppError> {
    let bytes = serde_json::to_vec(body).map_err(FeedError::from)?;
    Ok(([(CONTENT_TYPE, "application/json")], bytes).into_response())
}
