use std::sync::Arc;

use axum::extract::FromRef;
use domain::ports::{Clock, ContentRepository, EmailDelivery};
use moderation::{CommentLifecycle, LifecycleConfig, VisibilityResolver};

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentRepository>,
    pub lifecycle: Arc<CommentLifecycle>,
    pub visibility: Arc<VisibilityResolver>,
    pub admin_token: Arc<str>,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn ContentRepository>,
        mailer: Arc<dyn EmailDelivery>,
        clock: Arc<dyn Clock>,
        config: LifecycleConfig,
        admin_token: &str,
    ) -> Self {
        Self {
            lifecycle: Arc::new(CommentLifecycle::new(repo.clone(), mailer, clock, config)),
            visibility: Arc::new(VisibilityResolver::new(repo.clone())),
            content: repo,
            admin_token: Arc::from(admin_token),
        }
    }
}

impl FromRef<AppState> for Arc<VisibilityResolver> {
    fn from_ref(state: &AppState) -> Self {
        state.visibility.clone()
    }
}
