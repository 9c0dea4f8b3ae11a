//! List and extract endpoints.
//!
//! Document work blocks on the network, so it runs on the blocking pool.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::server::app::AppState;
use crate::server::response::{ApiError, Envelope};
use crate::service::{ChaptersData, ContentData};

#[derive(Debug, Default, Deserialize)]
pub struct ChaptersParams {
    pub url: Option<String>,
    pub chapter: Option<String>,
    pub content: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentParams {
    pub url: Option<String>,
    pub chapter: Option<String>,
}

/// `GET /api/chapters`
pub async fn chapters_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<ChaptersParams>, QueryRejection>,
) -> std::result::Result<Json<Envelope<ChaptersData>>, ApiError> {
    let Query(params) = params?;
    let service = state.service.clone();
    let data = run_blocking(move || {
        service.list(
            params.url.as_deref(),
            params.chapter.as_deref(),
            params.content,
        )
    })
    .await?;
    Ok(Json(Envelope::ok(data)))
}

/// `GET /api/content`
pub async fn content_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<ContentParams>, QueryRejection>,
) -> std::result::Result<Json<Envelope<ContentData>>, ApiError> {
    let Query(params) = params?;
    let service = state.service.clone();
    let data =
        run_blocking(move || service.extract(params.url.as_deref(), params.chapter.as_deref()))
            .await?;
    Ok(Json(Envelope::ok(data)))
}

pub async fn not_found_handler() -> ApiError {
    ApiError::not_found()
}

async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}
