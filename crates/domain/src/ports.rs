//! Collaborators the moderation workflow talks to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::filter::CommentFilter;
use crate::models::{Blog, Comment, NewComment};
use crate::protocol::VerificationEmail;

/// Persistence for comments plus read access to the CMS's blogs.
///
/// Errors are infrastructure failures only; "not found" is `Ok(None)` /
/// `Ok(false)`.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn find_blog_by_id(&self, id: &str) -> anyhow::Result<Option<Blog>>;

    /// Inserts or refreshes the local copy of a CMS blog.
    async fn save_blog(&self, blog: &Blog) -> anyhow::Result<()>;

    /// Persists a new comment and assigns its id.
    async fn create_comment(&self, new: NewComment) -> anyhow::Result<Comment>;

    async fn find_comment_by_id(&self, id: &str) -> anyhow::Result<Option<Comment>>;

    /// Overwrites the mutable fields of an existing comment.
    async fn save_comment(&self, comment: &Comment) -> anyhow::Result<()>;

    async fn find_comments(&self, filter: &CommentFilter) -> anyhow::Result<Vec<Comment>>;

    async fn delete_comment(&self, id: &str) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait EmailDelivery: Send + Sync {
    async fn send(&self, email: &VerificationEmail) -> anyhow::Result<()>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
