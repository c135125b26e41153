use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use domain::ports::ContentRepository;
use domain::validation::normalize_email;
use domain::{
    AdminComment, BlogSummary, Comment, CommentFilter, PublicComment, Result, StatusFilter,
};

/// "This browser's own submission": the address it used plus the token it
/// stored locally. A correlator only, never proof of identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub email: String,
    pub client_ref: String,
}

impl Viewer {
    /// Both halves are required; a lone email or token identifies nobody.
    pub fn from_parts(email: Option<&str>, client_ref: Option<&str>) -> Option<Self> {
        let email = normalize_email(email?);
        let client_ref = client_ref?.trim();
        if email.is_empty() || client_ref.is_empty() {
            return None;
        }
        Some(Self {
            email,
            client_ref: client_ref.to_string(),
        })
    }
}

/// Read side of the workflow: decides which comments a viewer gets to see.
pub struct VisibilityResolver {
    repo: Arc<dyn ContentRepository>,
}

impl VisibilityResolver {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    /// Approved comments of the blog, plus the viewer's own submissions in
    /// whatever state they are. Newest first.
    pub async fn list_for_blog(
        &self,
        blog_id: &str,
        viewer: Option<&Viewer>,
    ) -> Result<Vec<PublicComment>> {
        let mut comments = self
            .repo
            .find_comments(&CommentFilter {
                approved: Some(true),
                ..CommentFilter::for_blog(blog_id)
            })
            .await?;

        if let Some(viewer) = viewer {
            let own = self
                .repo
                .find_comments(&CommentFilter {
                    email: Some(viewer.email.clone()),
                    client_ref: Some(viewer.client_ref.clone()),
                    ..CommentFilter::for_blog(blog_id)
                })
                .await?;

            let mut seen: HashSet<String> = comments.iter().map(|c| c.id.clone()).collect();
            comments.extend(own.into_iter().filter(|c| seen.insert(c.id.clone())));
        }

        newest_first(&mut comments);
        Ok(comments.into_iter().map(PublicComment::from).collect())
    }

    pub async fn list_for_admin(&self, status: StatusFilter) -> Result<Vec<AdminComment>> {
        let mut comments = self.repo.find_comments(&status.to_filter()).await?;
        newest_first(&mut comments);

        let mut blogs: HashMap<String, Option<BlogSummary>> = HashMap::new();
        let mut rows = Vec::with_capacity(comments.len());
        for comment in comments {
            let blog = match blogs.get(&comment.blog_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self
                        .repo
                        .find_blog_by_id(&comment.blog_id)
                        .await?
                        .map(|b| BlogSummary::from(&b));
                    blogs.insert(comment.blog_id.clone(), found.clone());
                    found
                }
            };
            rows.push(AdminComment {
                state: comment.state(),
                comment,
                blog,
            });
        }
        Ok(rows)
    }
}

fn newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
