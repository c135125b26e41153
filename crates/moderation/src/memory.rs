//! In-memory implementation of `ContentRepository`.
//!
//! All state is lost on restart. Blogs are seeded by the caller since the
//! CMS owns them.

use std::collections::HashMap;

use async_trait::async_trait;
use domain::ports::ContentRepository;
use domain::{Blog, Comment, CommentFilter, NewComment};
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryRepository {
    blogs: RwLock<HashMap<String, Blog>>,
    comments: RwLock<HashMap<String, Comment>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            blogs: RwLock::new(HashMap::new()),
            comments: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_blogs(blogs: impl IntoIterator<Item = Blog>) -> Self {
        Self {
            blogs: RwLock::new(blogs.into_iter().map(|b| (b.id.clone(), b)).collect()),
            comments: RwLock::new(HashMap::new()),
        }
    }

    pub async fn remove_blog(&self, id: &str) -> Option<Blog> {
        self.blogs.write().await.remove(id)
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentRepository for InMemoryRepository {
    async fn find_blog_by_id(&self, id: &str) -> anyhow::Result<Option<Blog>> {
        Ok(self.blogs.read().await.get(id).cloned())
    }

    async fn save_blog(&self, blog: &Blog) -> anyhow::Result<()> {
        self.blogs
            .write()
            .await
            .insert(blog.id.clone(), blog.clone());
        Ok(())
    }

    async fn create_comment(&self, new: NewComment) -> anyhow::Result<Comment> {
        let comment = new.into_comment(Uuid::new_v4().to_string());
        self.comments
            .write()
            .await
            .insert(comment.id.clone(), comment.clone());
        Ok(comment)
    }

    async fn find_comment_by_id(&self, id: &str) -> anyhow::Result<Option<Comment>> {
        Ok(self.comments.read().await.get(id).cloned())
    }

    async fn save_comment(&self, comment: &Comment) -> anyhow::Result<()> {
        let mut comments = self.comments.write().await;
        match comments.get_mut(&comment.id) {
            Some(slot) => {
                *slot = comment.clone();
                Ok(())
            }
            None => anyhow::bail!("comment {} vanished before save", comment.id),
        }
    }

    async fn find_comments(&self, filter: &CommentFilter) -> anyhow::Result<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .values()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn delete_comment(&self, id: &str) -> anyhow::Result<bool> {
        Ok(self.comments.write().await.remove(id).is_some())
    }
}
