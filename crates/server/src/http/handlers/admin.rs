use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use domain::ports::ContentRepository;
use domain::{AdminComment, Blog, CommentError, StatusFilter, UpsertBlog};
use moderation::{APPROVED_MESSAGE, DELETED_MESSAGE};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::http::error::ApiError;
use crate::http::extract::JsonBody;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpsertBlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Deserialize)]
pub struct AdminListQuery {
    pub status: Option<String>,
}

fn require_admin(headers: &HeaderMap, state: &AppState) -> Result<(), ApiError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::MissingToken)?;

    let expected = format!("Bearer {}", state.admin_token);
    if auth_header != expected {
        return Err(ApiError::InvalidToken);
    }
    Ok(())
}

pub async fn list_comments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<Vec<AdminComment>>, ApiError> {
    require_admin(&headers, &state)?;

    let filter = StatusFilter::parse_lenient(query.status.as_deref());
    let rows = state.visibility.list_for_admin(filter).await?;
    Ok(Json(rows))
}

pub async fn approve_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&headers, &state)?;

    let comment = state.lifecycle.approve(&comment_id).await?;
    Ok(Json(json!({ "message": APPROVED_MESSAGE, "comment": comment })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(comment_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    require_admin(&headers, &state)?;

    state.lifecycle.delete(&comment_id).await?;
    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}

/// Called by the CMS whenever a post is published or renamed.
pub async fn upsert_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(blog_id): Path<String>,
    JsonBody(payload): JsonBody<UpsertBlogRequest>,
) -> Result<Json<Blog>, ApiError> {
    require_admin(&headers, &state)?;

    let blog = UpsertBlog {
        id: blog_id,
        title: payload.title,
        slug: payload.slug,
    }
    .validate()
    .map_err(CommentError::Validation)?;

    state
        .content
        .save_blog(&blog)
        .await
        .map_err(CommentError::from)?;

    info!("Blog {} mirrored", blog.id);
    Ok(Json(blog))
}
