mod error;
mod filter;
mod models;
pub mod ports;
pub mod protocol;
pub mod validation;

pub use error::{CommentError, Entity, FieldError, Result};
pub use filter::{CommentFilter, StatusFilter};
pub use models::{
    AdminComment, Blog, BlogSummary, Comment, CommentState, NewComment, PublicComment,
};
pub use validation::{SubmitComment, UpsertBlog, ValidSubmission};
