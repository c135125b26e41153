use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::CommentError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Comment(#[from] CommentError),

    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Invalid admin token")]
    InvalidToken,

    #[error(transparent)]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "kind": "unauthorized", "message": "Missing Authorization header" }),
            ),
            ApiError::InvalidToken => (
                StatusCode::FORBIDDEN,
                json!({ "kind": "forbidden", "message": "Invalid admin token" }),
            ),
            ApiError::Body(rejection) => (
                rejection.status(),
                json!({ "kind": "invalid_body", "message": rejection.body_text() }),
            ),
            ApiError::Comment(CommentError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                json!({ "kind": "validation", "message": "Invalid input", "errors": errors }),
            ),
            ApiError::Comment(CommentError::Infrastructure(e)) => {
                tracing::error!("Request failed: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "kind": "server_error", "message": "Server error" }),
                )
            }
            ApiError::Comment(e) => {
                let status = match e {
                    CommentError::NotFound(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, json!({ "kind": e.kind(), "message": e.to_string() }))
            }
        };

        (status, Json(body)).into_response()
    }
}
