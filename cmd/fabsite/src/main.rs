//! # fabsite
//!
//! The entry point that assembles the contact backend: configuration,
//! tracing, the submission store (Postgres or in-memory), the Brevo mailer,
//! and the axum router, with graceful shutdown and an explicit pool close.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api_adapters::{AppState, RateLimiter};
use auth_adapters::AdminKeyAuth;
use configs::AppConfig;
use domains::SubmissionRepo;
use mail_adapters::{BrevoMailer, BrevoSettings};
use services::ContactService;
use storage_adapters::InMemorySubmissionRepo;

#[cfg(feature = "db-postgres")]
use storage_adapters::PgSubmissionRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;

    // 1. Submission store: Postgres when configured, in-memory otherwise.
    #[cfg(feature = "db-postgres")]
    let pg_pool = match &config.database {
        Some(db) => Some(init_pg(db).await?),
        None => None,
    };

    #[cfg(feature = "db-postgres")]
    let repo: Arc<dyn SubmissionRepo> = match &pg_pool {
        Some(pool) => Arc::new(PgSubmissionRepo::new(pool.clone())),
        None => {
            warn!("no database configured, falling back to the in-memory store");
            Arc::new(InMemorySubmissionRepo::new())
        }
    };
    #[cfg(not(feature = "db-postgres"))]
    let repo: Arc<dyn SubmissionRepo> = {
        warn!("built without db-postgres, submissions are held in memory only");
        Arc::new(InMemorySubmissionRepo::new())
    };

    // 2. Notification dispatcher.
    let mailer = Arc::new(BrevoMailer::new(BrevoSettings {
        api_key: config.mail.api_key.clone(),
        api_base: config.mail.api_base.clone(),
        sender_email: config.mail.sender_email.clone(),
        sender_name: config.mail.sender_name.clone(),
        admin_email: config.mail.admin_email.clone(),
        site_phone: config.mail.site_phone.clone(),
    })?);
    mailer.verify().await;

    // 3. Wire everything into the shared request state.
    let contact = Arc::new(ContactService::new(repo, mailer));
    let state = AppState::new(
        contact,
        AdminKeyAuth::new(config.admin.api_key.clone()),
        RateLimiter::new(config.rate_limit.window, config.rate_limit.max_requests),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "fabsite listening");

    axum::serve(
        listener,
        api_adapters::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    #[cfg(feature = "db-postgres")]
    if let Some(pool) = pg_pool {
        pool.close().await;
        info!("database pool closed");
    }

    info!("shutdown complete");
    Ok(())
}

#[cfg(feature = "db-postgres")]
async fn init_pg(db: &configs::DatabaseConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(db.max_connections)
        .connect(&db.url)
        .await?;
    PgSubmissionRepo::run_migrations(&pool).await?;
    info!("database pool ready");
    Ok(pool)
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
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
