use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::{PublicComment, SubmitComment};
use moderation::{Viewer, VisibilityResolver, VERIFIED_MESSAGE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::http::error::ApiError;
use crate::http::extract::JsonBody;
use crate::state::AppState;

// Missing fields default to empty so they surface as field-level
// validation errors instead of a body rejection.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub blog: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub content: String,
    pub website: Option<String>,
    pub client_ref: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCommentRequest {
    #[serde(default)]
    pub comment_id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCommentsQuery {
    pub email: Option<String>,
    pub client_ref: Option<String>,
}

pub async fn post_comment(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let receipt = state
        .lifecycle
        .submit(SubmitComment {
            blog_id: payload.blog,
            name: payload.name,
            email: payload.email,
            content: payload.content,
            website: payload.website,
            client_ref: payload.client_ref,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": receipt.message, "commentId": receipt.comment_id })),
    ))
}

pub async fn verify_comment(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<VerifyCommentRequest>,
) -> Result<Json<Value>, ApiError> {
    let comment = state
        .lifecycle
        .verify(&payload.comment_id, &payload.code, &payload.email)
        .await?;

    Ok(Json(json!({
        "message": VERIFIED_MESSAGE,
        "comment": PublicComment::from(comment),
    })))
}

pub async fn list_blog_comments(
    State(visibility): State<Arc<VisibilityResolver>>,
    Path(blog_id): Path<String>,
    Query(query): Query<BlogCommentsQuery>,
) -> Result<Json<Vec<PublicComment>>, ApiError> {
    let viewer = Viewer::from_parts(query.email.as_deref(), query.client_ref.as_deref());
    let comments = visibility.list_for_blog(&blog_id, viewer.as_ref()).await?;
    Ok(Json(comments))
}
