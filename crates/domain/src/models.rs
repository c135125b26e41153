use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal mirror of a blog post owned by the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub title: String,
    pub slug: String,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            slug: blog.slug.clone(),
        }
    }
}

/// Moderation state derived from the `verified` / `approved` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentState {
    Pending,
    Verified,
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub blog_id: String,
    pub name: String,
    pub email: String,
    pub website: Option<String>,
    pub content: String,
    #[serde(skip_serializing)]
    pub verification_code: Option<String>,
    pub code_expires_at: Option<DateTime<Utc>>,
    pub verified: bool,
    pub approved: bool,
    pub client_ref: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn state(&self) -> CommentState {
        match (self.verified, self.approved) {
            (_, true) => CommentState::Approved,
            (true, false) => CommentState::Verified,
            (false, false) => CommentState::Pending,
        }
    }

    /// A code is outstanding only while both halves of it are present.
    pub fn outstanding_code(&self) -> Option<(&str, DateTime<Utc>)> {
        match (&self.verification_code, self.code_expires_at) {
            (Some(code), Some(expires_at)) => Some((code.as_str(), expires_at)),
            _ => None,
        }
    }
}

/// Fields handed to the repository when a submission is persisted.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub blog_id: String,
    pub name: String,
    pub email: String,
    pub website: Option<String>,
    pub content: String,
    pub verification_code: String,
    pub code_expires_at: DateTime<Utc>,
    pub client_ref: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    /// Materialises the pending record. Repositories call this once they have
    /// picked an id, so every backend starts from the same state.
    pub fn into_comment(self, id: String) -> Comment {
        Comment {
            id,
            blog_id: self.blog_id,
            name: self.name,
            email: self.email,
            website: self.website,
            content: self.content,
            verification_code: Some(self.verification_code),
            code_expires_at: Some(self.code_expires_at),
            verified: false,
            approved: false,
            client_ref: self.client_ref,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// What a visitor sees on a blog page. Never carries the code, the
/// submitter's address or the correlation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicComment {
    pub id: String,
    pub blog_id: String,
    pub name: String,
    pub website: Option<String>,
    pub content: String,
    pub verified: bool,
    pub approved: bool,
    pub pending: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for PublicComment {
    fn from(c: Comment) -> Self {
        PublicComment {
            pending: !c.approved,
            id: c.id,
            blog_id: c.blog_id,
            name: c.name,
            website: c.website,
            content: c.content,
            verified: c.verified,
            approved: c.approved,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Admin listing row: the comment plus enough of its blog to display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub state: CommentState,
    pub blog: Option<BlogSummary>,
}
