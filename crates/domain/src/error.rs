use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Blog,
    Comment,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Blog => write!(f, "Blog"),
            Entity::Comment => write!(f, "Comment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CommentError {
    #[error("Invalid input")]
    Validation(Vec<FieldError>),

    #[error("{0} not found")]
    NotFound(Entity),

    #[error("Email mismatch")]
    EmailMismatch,

    #[error("No code to verify")]
    NoCode,

    #[error("Code expired")]
    Expired,

    #[error("Invalid code")]
    InvalidCode,

    #[error("Comment not verified yet")]
    NotVerified,

    /// Store unreachable or similar; never part of the user-facing taxonomy.
    #[error(transparent)]
    Infrastructure(#[from] anyhow::Error),
}

impl CommentError {
    pub fn kind(&self) -> &'static str {
        match self {
            CommentError::Validation(_) => "validation",
            CommentError::NotFound(_) => "not_found",
            CommentError::EmailMismatch => "email_mismatch",
            CommentError::NoCode => "no_code",
            CommentError::Expired => "expired",
            CommentError::InvalidCode => "invalid_code",
            CommentError::NotVerified => "not_verified",
            CommentError::Infrastructure(_) => "server_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, CommentError>;
