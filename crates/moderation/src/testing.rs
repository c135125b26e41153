use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use domain::ports::{ContentRepository, EmailDelivery};
use domain::protocol::VerificationEmail;
use domain::{Blog, Comment, SubmitComment};

use crate::{
    CommentLifecycle, InMemoryRepository, LifecycleConfig, ManualClock, SubmitReceipt,
    VisibilityResolver,
};

pub const BLOG_ID: &str = "b1";

#[derive(Default)]
pub struct RecordingMailer {
    fail: bool,
    sent: Mutex<Vec<VerificationEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<VerificationEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailDelivery for RecordingMailer {
    async fn send(&self, email: &VerificationEmail) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("smtp relay refused connection");
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Accepts a message and never finishes sending it.
pub struct StalledMailer;

#[async_trait]
impl EmailDelivery for StalledMailer {
    async fn send(&self, _email: &VerificationEmail) -> anyhow::Result<()> {
        std::future::pending().await
    }
}

pub struct Harness {
    pub repo: Arc<InMemoryRepository>,
    pub clock: Arc<ManualClock>,
    pub mailer: Arc<RecordingMailer>,
    pub lifecycle: CommentLifecycle,
    pub resolver: VisibilityResolver,
}

impl Harness {
    pub async fn stored(&self, id: &str) -> Comment {
        self.repo.find_comment_by_id(id).await.unwrap().unwrap()
    }

    pub async fn code_of(&self, id: &str) -> String {
        self.stored(id)
            .await
            .verification_code
            .expect("comment has an outstanding code")
    }
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn seeded_repo() -> InMemoryRepository {
    InMemoryRepository::with_blogs([
        Blog {
            id: BLOG_ID.into(),
            title: "Hello World".into(),
            slug: "hello-world".into(),
        },
        Blog {
            id: "b2".into(),
            title: "Second Post".into(),
            slug: "second-post".into(),
        },
    ])
}

fn build(fail: bool) -> Harness {
    let repo = Arc::new(seeded_repo());
    let clock = Arc::new(ManualClock::new(start()));
    let mailer = Arc::new(RecordingMailer {
        fail,
        ..Default::default()
    });

    let lifecycle = CommentLifecycle::new(
        repo.clone(),
        mailer.clone(),
        clock.clone(),
        LifecycleConfig::default(),
    );
    let resolver = VisibilityResolver::new(repo.clone());

    Harness {
        repo,
        clock,
        mailer,
        lifecycle,
        resolver,
    }
}

pub fn harness() -> Harness {
    build(false)
}

pub fn harness_with_failing_mailer() -> Harness {
    build(true)
}

pub fn submission(blog_id: &str, name: &str, email: &str, client_ref: Option<&str>) -> SubmitComment {
    SubmitComment {
        blog_id: blog_id.into(),
        name: name.into(),
        email: email.into(),
        content: "Nice post!".into(),
        website: None,
        client_ref: client_ref.map(Into::into),
    }
}

pub async fn submit_ann(h: &Harness) -> SubmitReceipt {
    h.lifecycle
        .submit(submission(BLOG_ID, "Ann", "ann@x.com", Some("ann-browser")))
        .await
        .unwrap()
}

/// Submits, verifies and approves; returns the comment id.
pub async fn publish(h: &Harness, blog_id: &str, name: &str, email: &str) -> String {
    let id = h
        .lifecycle
        .submit(submission(blog_id, name, email, None))
        .await
        .unwrap()
        .comment_id;
    let code = h.code_of(&id).await;
    h.lifecycle.verify(&id, &code, email).await.unwrap();
    h.lifecycle.approve(&id).await.unwrap();
    id
}
