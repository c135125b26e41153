use crate::{models::SqlBlog, Db};
use domain::Blog;

impl Db {
    pub async fn get_blog(&self, id: &str) -> anyhow::Result<Option<Blog>> {
        let row = sqlx::query_as::<_, SqlBlog>("SELECT id, title, slug FROM blogs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    // Blogs are authored in the CMS; this keeps the local mirror in sync.
    pub async fn upsert_blog(&self, blog: &Blog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO blogs (id, title, slug)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                slug = excluded.slug
            "#,
        )
        .bind(&blog.id)
        .bind(&blog.title)
        .bind(&blog.slug)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
