use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::{info, warn};

use hustle_catalog::text::slugify;
use hustle_types::api::{RevalidateBody, RevalidateResponse};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: u64 = 6;

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .cms()?
        .list_posts(query.offset.unwrap_or(0), query.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .cms()?
        .post_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;
    Ok(Json(post))
}

#[derive(Debug, Deserialize)]
pub struct RevalidateQuery {
    pub secret: Option<String>,
}

fn check_secret(state: &AppState, given: Option<&str>) -> Result<(), ApiError> {
    match (state.config.revalidate_secret.as_deref(), given) {
        (Some(expected), Some(given)) if expected == given => Ok(()),
        _ => Err(ApiError::unauthorized("Invalid secret")),
    }
}

/// Pages affected by a change to one post.
pub fn revalidation_paths(body: &RevalidateBody) -> Vec<String> {
    let mut paths = vec!["/blog".to_string()];

    let post_slug = body
        .slug
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| body.title.as_deref().map(slugify))
        .filter(|s| !s.is_empty());
    if let Some(slug) = post_slug {
        paths.push(format!("/blog/{slug}"));
    }

    paths.push("/".to_string());
    paths.push("/sitemap.xml".to_string());
    paths
}

async fn revalidate(state: &AppState, paths: Vec<String>) -> RevalidateResponse {
    match state.cms() {
        Ok(cms) => cms.invalidate().await,
        Err(_) => warn!("Revalidation requested but no CMS is configured"),
    }
    info!("Revalidated {:?}", paths);

    RevalidateResponse {
        revalidated: true,
        now: chrono::Utc::now().timestamp_millis(),
        paths,
    }
}

/// CMS webhook. The body is optional and may carry more fields than used.
pub async fn revalidate_post(
    State(state): State<AppState>,
    Query(query): Query<RevalidateQuery>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    check_secret(&state, query.secret.as_deref())?;

    let body: RevalidateBody = if body.is_empty() {
        RevalidateBody::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            warn!("Ignoring unreadable revalidation body: {}", e);
            RevalidateBody::default()
        })
    };

    Ok(Json(revalidate(&state, revalidation_paths(&body)).await))
}

/// Manual trigger for the listing pages.
pub async fn revalidate_get(
    State(state): State<AppState>,
    Query(query): Query<RevalidateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    check_secret(&state, query.secret.as_deref())?;
    Ok(Json(revalidate(&state, vec!["/blog".into(), "/".into()]).await))
}
