use chrono::{DateTime, Utc};
use domain::{Blog, Comment};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub id: String,
    pub blog_id: String,
    pub name: String,
    pub email: String,
    pub website: Option<String>,
    pub content: String,
    pub verification_code: Option<String>,
    pub code_expires_at: Option<DateTime<Utc>>,
    pub verified: bool,
    pub approved: bool,
    pub client_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id,
            blog_id: sql.blog_id,
            name: sql.name,
            email: sql.email,
            website: sql.website,
            content: sql.content,
            verification_code: sql.verification_code,
            code_expires_at: sql.code_expires_at,
            verified: sql.verified,
            approved: sql.approved,
            client_ref: sql.client_ref,
            created_at: sql.created_at,
            updated_at: sql.updated_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlBlog {
    pub id: String,
    pub title: String,
    pub slug: String,
}

impl From<SqlBlog> for Blog {
    fn from(sql: SqlBlog) -> Self {
        Blog {
            id: sql.id,
            title: sql.title,
            slug: sql.slug,
        }
    }
}
