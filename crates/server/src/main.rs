mod config;
mod http;
mod seed;
mod state;

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use domain::ports::SystemClock;
use moderation::LifecycleConfig;
use storage::Db;

use crate::config::{Settings, DEFAULT_ADMIN_TOKEN};
use crate::http::router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;
    if settings.security.admin_token == DEFAULT_ADMIN_TOKEN {
        warn!("security.admin_token is still the default, admin routes are effectively public");
    }

    let db = Db::new(&settings.database.url)
        .await
        .with_context(|| format!("Failed to open database: {}", settings.database.url))?;

    if let Some(path) = &settings.database.seed_file {
        crate::seed::seed_blogs(&db, path).await?;
    }

    let mail_config = adapter::MailConfig::try_from(settings.mail.clone())
        .context("Invalid mail configuration")?;
    let mailer = adapter::build_mailer(mail_config).context("Failed to initialize mail delivery")?;

    let state = AppState::new(
        Arc::new(db),
        mailer,
        Arc::new(SystemClock),
        LifecycleConfig {
            code_ttl: chrono::Duration::minutes(settings.verification.code_ttl_minutes),
        },
        &settings.security.admin_token,
    );

    let app = build_router(state.clone(), &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Waiting for outstanding verification emails...");
    state.lifecycle.wait_for_deliveries().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
