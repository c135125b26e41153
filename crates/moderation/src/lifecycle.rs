use std::sync::Arc;

use chrono::Duration;
use domain::ports::{Clock, ContentRepository, EmailDelivery};
use domain::protocol::{build_verification_email, VerificationEmail};
use domain::validation::normalize_email;
use domain::{Comment, CommentError, Entity, NewComment, Result, SubmitComment};
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use crate::code::generate_code;

pub const SUBMITTED_MESSAGE: &str = "Verification code sent to email";
pub const VERIFIED_MESSAGE: &str = "Comment verified. Awaiting admin approval.";
pub const APPROVED_MESSAGE: &str = "Comment approved";
pub const DELETED_MESSAGE: &str = "Comment deleted";

#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// How long an issued code stays acceptable.
    pub code_ttl: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub comment_id: String,
    pub message: &'static str,
}

/// Owns every state transition of a comment: submit, verify, approve, delete.
pub struct CommentLifecycle {
    repo: Arc<dyn ContentRepository>,
    mailer: Arc<dyn EmailDelivery>,
    clock: Arc<dyn Clock>,
    config: LifecycleConfig,
    deliveries: TaskTracker,
}

impl CommentLifecycle {
    pub fn new(
        repo: Arc<dyn ContentRepository>,
        mailer: Arc<dyn EmailDelivery>,
        clock: Arc<dyn Clock>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            repo,
            mailer,
            clock,
            config,
            deliveries: TaskTracker::new(),
        }
    }

    pub async fn submit(&self, input: SubmitComment) -> Result<SubmitReceipt> {
        let valid = input.validate().map_err(CommentError::Validation)?;

        let blog = self
            .repo
            .find_blog_by_id(&valid.blog_id)
            .await?
            .ok_or(CommentError::NotFound(Entity::Blog))?;

        let code = generate_code(&mut rand::thread_rng());
        let now = self.clock.now();

        let comment = self
            .repo
            .create_comment(NewComment {
                blog_id: valid.blog_id,
                name: valid.name,
                email: valid.email,
                website: valid.website,
                content: valid.content,
                verification_code: code.clone(),
                code_expires_at: now + self.config.code_ttl,
                client_ref: valid.client_ref,
                created_at: now,
            })
            .await?;

        info!(
            "Comment {} submitted on blog {}, awaiting verification",
            comment.id, blog.id
        );

        let email = build_verification_email(
            &comment.email,
            &comment.name,
            &code,
            &blog.title,
            self.config.code_ttl.num_minutes(),
        );
        self.dispatch(email);

        Ok(SubmitReceipt {
            comment_id: comment.id,
            message: SUBMITTED_MESSAGE,
        })
    }

    pub async fn verify(&self, comment_id: &str, code: &str, email: &str) -> Result<Comment> {
        let mut comment = self.load(comment_id).await?;

        if comment.email != normalize_email(email) {
            return Err(CommentError::EmailMismatch);
        }

        let (expected, expires_at) = comment.outstanding_code().ok_or(CommentError::NoCode)?;
        if self.clock.now() >= expires_at {
            return Err(CommentError::Expired);
        }
        if expected != code.trim() {
            return Err(CommentError::InvalidCode);
        }

        comment.verified = true;
        comment.verification_code = None;
        comment.code_expires_at = None;
        comment.updated_at = self.clock.now();
        self.repo.save_comment(&comment).await?;

        info!("Comment {} verified", comment.id);
        Ok(comment)
    }

    pub async fn approve(&self, comment_id: &str) -> Result<Comment> {
        let mut comment = self.load(comment_id).await?;

        if !comment.verified {
            return Err(CommentError::NotVerified);
        }
        if comment.approved {
            return Ok(comment);
        }

        comment.approved = true;
        comment.updated_at = self.clock.now();
        self.repo.save_comment(&comment).await?;

        info!("Comment {} approved", comment.id);
        Ok(comment)
    }

    pub async fn delete(&self, comment_id: &str) -> Result<()> {
        if !self.repo.delete_comment(comment_id).await? {
            return Err(CommentError::NotFound(Entity::Comment));
        }
        info!("Comment {} deleted", comment_id);
        Ok(())
    }

    /// Waits until every delivery spawned so far has finished.
    pub async fn wait_for_deliveries(&self) {
        self.deliveries.close();
        self.deliveries.wait().await;
        self.deliveries.reopen();
    }

    async fn load(&self, comment_id: &str) -> Result<Comment> {
        self.repo
            .find_comment_by_id(comment_id)
            .await?
            .ok_or(CommentError::NotFound(Entity::Comment))
    }

    // Delivery never fails the submission: on error the code goes to the log
    // so an operator can still hand it out.
    fn dispatch(&self, email: VerificationEmail) {
        let mailer = Arc::clone(&self.mailer);
        self.deliveries.spawn(async move {
            if let Err(e) = mailer.send(&email).await {
                warn!("Email send failed, falling back to log: {:#}", e);
                warn!("Verification code for {}: {}", email.to, email.code);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        harness, harness_with_failing_mailer, seeded_repo, start, submission, submit_ann,
        StalledMailer, BLOG_ID,
    };
    use crate::ManualClock;
    use domain::CommentState;

    #[tokio::test]
    async fn submit_creates_pending_comment_with_fresh_code() {
        let h = harness();
        let receipt = submit_ann(&h).await;
        assert_eq!(receipt.message, SUBMITTED_MESSAGE);

        let stored = h.stored(&receipt.comment_id).await;
        assert_eq!(stored.state(), CommentState::Pending);
        assert!(!stored.verified && !stored.approved);
        assert_eq!(stored.email, "ann@x.com");
        assert_eq!(stored.blog_id, BLOG_ID);

        let (code, expires_at) = stored.outstanding_code().unwrap();
        assert_eq!(code.len(), 4);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(expires_at - stored.created_at, Duration::minutes(10));
    }

    #[tokio::test]
    async fn submit_mails_code_with_name_and_blog_title() {
        let h = harness();
        let receipt = submit_ann(&h).await;
        h.lifecycle.wait_for_deliveries().await;

        let sent = h.mailer.sent();
        assert_eq!(sent.len(), 1);
        let code = h.code_of(&receipt.comment_id).await;
        assert_eq!(sent[0].to, "ann@x.com");
        assert_eq!(sent[0].code, code);
        assert!(sent[0].text.contains("Hi Ann,"));
        assert!(sent[0].text.contains("Hello World"));
    }

    #[tokio::test]
    async fn submit_survives_mail_failure() {
        let h = harness_with_failing_mailer();
        let receipt = submit_ann(&h).await;
        h.lifecycle.wait_for_deliveries().await;

        let stored = h.stored(&receipt.comment_id).await;
        assert!(stored.outstanding_code().is_some());
    }

    #[tokio::test]
    async fn submit_returns_while_mail_is_still_in_flight() {
        let repo = Arc::new(seeded_repo());
        let lifecycle = CommentLifecycle::new(
            repo.clone(),
            Arc::new(StalledMailer),
            Arc::new(ManualClock::new(start())),
            LifecycleConfig::default(),
        );

        let receipt = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            lifecycle.submit(submission(BLOG_ID, "Ann", "ann@x.com", None)),
        )
        .await
        .expect("submit waited on the mailer")
        .unwrap();
        assert_eq!(receipt.message, SUBMITTED_MESSAGE);

        let stored = repo
            .find_comment_by_id(&receipt.comment_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.state(), CommentState::Pending);
        assert!(stored.outstanding_code().is_some());
    }

    #[tokio::test]
    async fn submit_rejects_invalid_fields_together() {
        let h = harness();
        let err = h
            .lifecycle
            .submit(SubmitComment {
                blog_id: BLOG_ID.into(),
                name: "".into(),
                email: "nope".into(),
                content: "ok".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            CommentError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, vec!["name", "email", "content"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn submit_on_unknown_blog_is_not_found() {
        let h = harness();
        let err = h
            .lifecycle
            .submit(SubmitComment {
                blog_id: "missing".into(),
                name: "Ann".into(),
                email: "ann@x.com".into(),
                content: "Nice post!".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CommentError::NotFound(Entity::Blog)));
    }

    #[tokio::test]
    async fn verify_flips_flag_and_erases_code() {
        let h = harness();
        let id = submit_ann(&h).await.comment_id;
        let code = h.code_of(&id).await;

        let comment = h.lifecycle.verify(&id, &code, "ANN@x.com").await.unwrap();
        assert!(comment.verified);
        assert!(!comment.approved);
        assert_eq!(comment.verification_code, None);
        assert_eq!(comment.code_expires_at, None);

        let stored = h.stored(&id).await;
        assert_eq!(stored.state(), CommentState::Verified);
        assert!(stored.outstanding_code().is_none());

        let replay = h.lifecycle.verify(&id, &code, "ann@x.com").await.unwrap_err();
        assert!(matches!(replay, CommentError::NoCode));
    }

    #[tokio::test]
    async fn verify_after_expiry_fails_and_keeps_pending() {
        let h = harness();
        let id = submit_ann(&h).await.comment_id;
        let code = h.code_of(&id).await;

        h.clock.advance(Duration::minutes(11));
        let err = h.lifecycle.verify(&id, &code, "ann@x.com").await.unwrap_err();
        assert!(matches!(err, CommentError::Expired));
        assert!(!h.stored(&id).await.verified);
    }

    #[tokio::test]
    async fn code_is_dead_at_the_exact_expiry_instant() {
        let h = harness();
        let early = submit_ann(&h).await.comment_id;
        let late = submit_ann(&h).await.comment_id;

        h.clock.advance(Duration::minutes(10) - Duration::seconds(1));
        let code = h.code_of(&early).await;
        assert!(h.lifecycle.verify(&early, &code, "ann@x.com").await.is_ok());

        h.clock.advance(Duration::seconds(1));
        let code = h.code_of(&late).await;
        let err = h.lifecycle.verify(&late, &code, "ann@x.com").await.unwrap_err();
        assert!(matches!(err, CommentError::Expired));
    }

    #[tokio::test]
    async fn wrong_code_leaves_record_untouched() {
        let h = harness();
        let id = submit_ann(&h).await.comment_id;
        let code = h.code_of(&id).await;
        let wrong = if code == "1000" { "1001" } else { "1000" };

        let before = h.stored(&id).await;
        let err = h.lifecycle.verify(&id, wrong, "ann@x.com").await.unwrap_err();
        assert!(matches!(err, CommentError::InvalidCode));
        assert_eq!(h.stored(&id).await, before);
    }

    #[tokio::test]
    async fn mismatched_email_wins_over_correct_code() {
        let h = harness();
        let id = submit_ann(&h).await.comment_id;
        let code = h.code_of(&id).await;

        let err = h.lifecycle.verify(&id, &code, "bob@x.com").await.unwrap_err();
        assert!(matches!(err, CommentError::EmailMismatch));
        assert!(!h.stored(&id).await.verified);
    }

    #[tokio::test]
    async fn verify_unknown_comment_is_not_found() {
        let h = harness();
        let err = h.lifecycle.verify("nope", "1234", "ann@x.com").await.unwrap_err();
        assert!(matches!(err, CommentError::NotFound(Entity::Comment)));
    }

    #[tokio::test]
    async fn approval_requires_verification_and_is_idempotent() {
        let h = harness();
        let id = submit_ann(&h).await.comment_id;

        let err = h.lifecycle.approve(&id).await.unwrap_err();
        assert!(matches!(err, CommentError::NotVerified));
        assert!(!h.stored(&id).await.approved);

        let code = h.code_of(&id).await;
        h.lifecycle.verify(&id, &code, "ann@x.com").await.unwrap();

        let first = h.lifecycle.approve(&id).await.unwrap();
        assert!(first.approved && first.verified);

        h.clock.advance(Duration::minutes(1));
        let second = h.lifecycle.approve(&id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(h.stored(&id).await, first);
    }

    #[tokio::test]
    async fn delete_removes_from_any_state() {
        let h = harness();
        let id = submit_ann(&h).await.comment_id;

        h.lifecycle.delete(&id).await.unwrap();

        let err = h.lifecycle.delete(&id).await.unwrap_err();
        assert!(matches!(err, CommentError::NotFound(Entity::Comment)));
        let err = h.lifecycle.verify(&id, "1234", "ann@x.com").await.unwrap_err();
        assert!(matches!(err, CommentError::NotFound(Entity::Comment)));
        let err = h.lifecycle.approve(&id).await.unwrap_err();
        assert!(matches!(err, CommentError::NotFound(Entity::Comment)));
    }
}
