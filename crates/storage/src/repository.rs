use async_trait::async_trait;
use domain::ports::ContentRepository;
use domain::{Blog, Comment, CommentFilter, NewComment};

use crate::Db;

#[async_trait]
impl ContentRepository for Db {
    async fn find_blog_by_id(&self, id: &str) -> anyhow::Result<Option<Blog>> {
        self.get_blog(id).await
    }

    async fn save_blog(&self, blog: &Blog) -> anyhow::Result<()> {
        self.upsert_blog(blog).await
    }

    async fn create_comment(&self, new: NewComment) -> anyhow::Result<Comment> {
        self.insert_comment(new).await
    }

    async fn find_comment_by_id(&self, id: &str) -> anyhow::Result<Option<Comment>> {
        self.get_comment(id).await
    }

    async fn save_comment(&self, comment: &Comment) -> anyhow::Result<()> {
        self.update_comment(comment).await
    }

    async fn find_comments(&self, filter: &CommentFilter) -> anyhow::Result<Vec<Comment>> {
        self.list_comments(filter).await
    }

    async fn delete_comment(&self, id: &str) -> anyhow::Result<bool> {
        self.remove_comment(id).await
    }
}
