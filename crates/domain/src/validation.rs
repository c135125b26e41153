use validator::{Validate, ValidationErrors};

use crate::error::FieldError;
use crate::models::Blog;

pub const NAME_MAX_CHARS: usize = 80;
pub const CONTENT_MIN_CHARS: usize = 3;
pub const CONTENT_MAX_CHARS: usize = 2000;

/// Raw submission as it arrives from a visitor.
#[derive(Debug, Clone, Default)]
pub struct SubmitComment {
    pub blog_id: String,
    pub name: String,
    pub email: String,
    pub content: String,
    pub website: Option<String>,
    pub client_ref: Option<String>,
}

/// Submission after trimming and normalisation. Only obtainable through
/// [`SubmitComment::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub blog_id: String,
    pub name: String,
    pub email: String,
    pub content: String,
    pub website: Option<String>,
    pub client_ref: Option<String>,
}

// Limits are in characters; keep them in line with the constants above.
#[derive(Debug, Validate)]
struct CommentDraft {
    #[validate(length(min = 1))]
    blog: String,
    #[validate(length(min = 1, max = 80))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(length(min = 3, max = 2000))]
    content: String,
}

impl CommentDraft {
    fn field_errors(&self, errors: &ValidationErrors) -> Vec<FieldError> {
        let failed = errors.field_errors();
        let mut out = Vec::new();

        if failed.contains_key("blog") {
            out.push(FieldError::new("blog", "Blog is required"));
        }
        if failed.contains_key("name") {
            let message = if self.name.is_empty() {
                "Name is required"
            } else {
                "Name is too long"
            };
            out.push(FieldError::new("name", message));
        }
        if failed.contains_key("email") {
            out.push(FieldError::new("email", "Valid email is required"));
        }
        if failed.contains_key("content") {
            let message = if self.content.chars().count() < CONTENT_MIN_CHARS {
                "Comment is too short"
            } else {
                "Comment is too long"
            };
            out.push(FieldError::new("content", message));
        }
        out
    }
}

impl SubmitComment {
    /// Checks every field and reports all failures at once.
    pub fn validate(self) -> Result<ValidSubmission, Vec<FieldError>> {
        let draft = CommentDraft {
            blog: self.blog_id.trim().to_string(),
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            content: self.content.trim().to_string(),
        };

        if let Err(errors) = draft.validate() {
            return Err(draft.field_errors(&errors));
        }

        Ok(ValidSubmission {
            blog_id: draft.blog,
            name: draft.name,
            email: draft.email,
            content: draft.content,
            website: non_blank(self.website),
            client_ref: non_blank(self.client_ref),
        })
    }
}

/// A blog pushed from the CMS into the local mirror.
#[derive(Debug, Clone, Default)]
pub struct UpsertBlog {
    pub id: String,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Validate)]
struct BlogDraft {
    #[validate(length(min = 1))]
    id: String,
    #[validate(length(min = 1))]
    title: String,
    #[validate(length(min = 1))]
    slug: String,
}

impl UpsertBlog {
    pub fn validate(self) -> Result<Blog, Vec<FieldError>> {
        let draft = BlogDraft {
            id: self.id.trim().to_string(),
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
        };

        if let Err(errors) = draft.validate() {
            let failed = errors.field_errors();
            return Err([
                ("id", "Blog id is required"),
                ("title", "Title is required"),
                ("slug", "Slug is required"),
            ]
            .into_iter()
            .filter(|(field, _)| failed.contains_key(*field))
            .map(|(field, message)| FieldError::new(field, message))
            .collect());
        }

        Ok(Blog {
            id: draft.id,
            title: draft.title,
            slug: draft.slug,
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SubmitComment {
        SubmitComment {
            blog_id: "b1".into(),
            name: "  Ann ".into(),
            email: " Ann@X.com ".into(),
            content: "  Nice post!  ".into(),
            website: Some("   ".into()),
            client_ref: Some("ref-1".into()),
        }
    }

    #[test]
    fn normalizes_fields() {
        let v = valid().validate().unwrap();
        assert_eq!(v.name, "Ann");
        assert_eq!(v.email, "ann@x.com");
        assert_eq!(v.content, "Nice post!");
        assert_eq!(v.website, None);
        assert_eq!(v.client_ref.as_deref(), Some("ref-1"));
    }

    #[test]
    fn reports_every_invalid_field() {
        let errors = SubmitComment {
            blog_id: "".into(),
            name: " ".into(),
            email: "not-an-email".into(),
            content: " hi ".into(),
            website: None,
            client_ref: None,
        }
        .validate()
        .unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["blog", "name", "email", "content"]);
        assert_eq!(errors[1].message, "Name is required");
        assert_eq!(errors[3].message, "Comment is too short");
    }

    #[test]
    fn content_length_is_measured_after_trim() {
        let mut input = valid();
        input.content = "  abc  ".into();
        assert!(input.validate().is_ok());

        let mut input = valid();
        input.content = "x".repeat(CONTENT_MAX_CHARS);
        assert!(input.validate().is_ok());

        let mut input = valid();
        input.content = "x".repeat(CONTENT_MAX_CHARS + 1);
        let errors = input.validate().unwrap_err();
        assert_eq!(errors[0].message, "Comment is too long");
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let mut input = valid();
        input.name = "é".repeat(NAME_MAX_CHARS);
        assert!(input.validate().is_ok());

        let mut input = valid();
        input.name = "n".repeat(NAME_MAX_CHARS + 1);
        let errors = input.validate().unwrap_err();
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "Name is too long");
    }

    #[test]
    fn email_syntax() {
        for ok in ["ann@x.com", "a.b+c@mail.example.org"] {
            let mut input = valid();
            input.email = ok.into();
            assert!(input.validate().is_ok(), "{ok}");
        }
        for bad in ["", "@x.com", "ann@@x.com", "an n@x.com", "ann.x.com"] {
            let mut input = valid();
            input.email = bad.into();
            let errors = input.validate().unwrap_err();
            assert_eq!(errors[0].field, "email", "{bad}");
        }
    }

    #[test]
    fn blog_upsert_requires_every_field() {
        let blog = UpsertBlog {
            id: " demo-post ".into(),
            title: "Demo".into(),
            slug: "demo".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(blog.id, "demo-post");

        let errors = UpsertBlog {
            id: "demo-post".into(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "slug"]);
    }
}
