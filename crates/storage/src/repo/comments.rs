use crate::{models::SqlComment, Db};
use domain::{Comment, CommentFilter, NewComment};
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

const COMMENT_COLUMNS: &str = r#"
    id, blog_id, name, email, website, content,
    verification_code, code_expires_at, verified, approved,
    client_ref, created_at, updated_at
"#;

impl Db {
    pub async fn insert_comment(&self, new: NewComment) -> anyhow::Result<Comment> {
        let c = new.into_comment(Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO comments (
                id, blog_id, name, email, website, content,
                verification_code, code_expires_at, verified, approved,
                client_ref, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&c.id)
        .bind(&c.blog_id)
        .bind(&c.name)
        .bind(&c.email)
        .bind(&c.website)
        .bind(&c.content)
        .bind(&c.verification_code)
        .bind(c.code_expires_at)
        .bind(c.verified)
        .bind(c.approved)
        .bind(&c.client_ref)
        .bind(c.created_at)
        .bind(c.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(c)
    }

    pub async fn get_comment(&self, id: &str) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Writes back everything except the id, the parent blog and the
    /// creation time, which never change.
    pub async fn update_comment(&self, c: &Comment) -> anyhow::Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE comments SET
                name = ?,
                email = ?,
                website = ?,
                content = ?,
                verification_code = ?,
                code_expires_at = ?,
                verified = ?,
                approved = ?,
                client_ref = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&c.name)
        .bind(&c.email)
        .bind(&c.website)
        .bind(&c.content)
        .bind(&c.verification_code)
        .bind(c.code_expires_at)
        .bind(c.verified)
        .bind(c.approved)
        .bind(&c.client_ref)
        .bind(c.updated_at)
        .bind(&c.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            anyhow::bail!("comment {} vanished before save", c.id);
        }
        Ok(())
    }

    pub async fn list_comments(&self, filter: &CommentFilter) -> anyhow::Result<Vec<Comment>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE 1 = 1"));

        if let Some(blog_id) = &filter.blog_id {
            qb.push(" AND blog_id = ").push_bind(blog_id.clone());
        }
        if let Some(verified) = filter.verified {
            qb.push(" AND verified = ").push_bind(verified);
        }
        if let Some(approved) = filter.approved {
            qb.push(" AND approved = ").push_bind(approved);
        }
        if let Some(email) = &filter.email {
            qb.push(" AND email = ").push_bind(email.clone());
        }
        if let Some(client_ref) = &filter.client_ref {
            qb.push(" AND client_ref = ").push_bind(client_ref.clone());
        }
        qb.push(" ORDER BY created_at DESC, id DESC");

        let rows = qb
            .build_query_as::<SqlComment>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn remove_comment(&self, id: &str) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
