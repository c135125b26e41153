use crate::models::Comment;
use serde::Serialize;

/// Admin listing filter. Anything unrecognised lists everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Verified,
    Approved,
}

impl StatusFilter {
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("pending") => StatusFilter::Pending,
            Some("verified") | Some("verified-awaiting-approval") => StatusFilter::Verified,
            Some("approved") => StatusFilter::Approved,
            _ => StatusFilter::All,
        }
    }

    pub fn to_filter(self) -> CommentFilter {
        let base = CommentFilter::default();
        match self {
            StatusFilter::All => base,
            StatusFilter::Pending => CommentFilter {
                verified: Some(false),
                ..base
            },
            StatusFilter::Verified => CommentFilter {
                verified: Some(true),
                approved: Some(false),
                ..base
            },
            StatusFilter::Approved => CommentFilter {
                approved: Some(true),
                ..base
            },
        }
    }
}

/// Conjunction of optional equality constraints understood by every
/// repository backend. `None` means "don't care".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentFilter {
    pub blog_id: Option<String>,
    pub verified: Option<bool>,
    pub approved: Option<bool>,
    pub email: Option<String>,
    pub client_ref: Option<String>,
}

impl CommentFilter {
    pub fn for_blog(blog_id: impl Into<String>) -> Self {
        Self {
            blog_id: Some(blog_id.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, c: &Comment) -> bool {
        fn eq<T: PartialEq + ?Sized>(want: Option<&T>, have: &T) -> bool {
            want.map_or(true, |w| w == have)
        }

        eq(self.blog_id.as_deref(), c.blog_id.as_str())
            && eq(self.verified.as_ref(), &c.verified)
            && eq(self.approved.as_ref(), &c.approved)
            && eq(self.email.as_deref(), c.email.as_str())
            && self
                .client_ref
                .as_deref()
                .map_or(true, |r| c.client_ref.as_deref() == Some(r))
    }
}
