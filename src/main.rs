//! PeerHub delivery server — notification fan-out pipeline.
//!
//! Main entry point that wires the repositories, channel providers,
//! creation queue, and dispatcher together and runs the consumer task
//! plus the notification expiry sweep.

use std::sync::Arc;
use std::time::Duration;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use peerhub_channels::{FcmPushSender, SmtpEmailSender, TelegramChatNotifier};
use peerhub_core::config::AppConfig;
use peerhub_core::error::AppError;
use peerhub_database::repositories::notification::NotificationRepository;
use peerhub_database::repositories::profile::ProfileRepository;
use peerhub_database::repositories::user::UserRepository;
use peerhub_database::{DatabasePool, migration};
use peerhub_dispatch::{DedupGuard, NotificationDispatcher, NotificationQueue};
use peerhub_service::{NotificationFactory, NotificationService};

/// How often expired notifications are swept out of the store.
const EXPIRY_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() {
    let env = std::env::var("PEERHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Wire the delivery pipeline and run until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PeerHub delivery v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    migration::run_migrations(db.pool()).await?;

    let notification_repo = Arc::new(NotificationRepository::new(db.pool().clone()));
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let profile_repo = Arc::new(ProfileRepository::new(db.pool().clone()));

    let push = Arc::new(FcmPushSender::new(config.delivery.push.clone()));
    let email = Arc::new(SmtpEmailSender::new(config.delivery.email.clone())?);
    let chat = Arc::new(TelegramChatNotifier::new(config.delivery.chat.clone()));
    let dedup = Arc::new(DedupGuard::new(&config.delivery.dedup));

    let (queue, receiver) = NotificationQueue::channel(config.delivery.queue_buffer);

    let dispatcher = Arc::new(NotificationDispatcher::new(
        user_repo.clone(),
        push,
        email,
        chat,
        dedup,
        config.delivery.clone(),
    ));

    // The single consumer: the receiver moves into this task, so no
    // second listener can ever be registered.
    let consumer = tokio::spawn(dispatcher.run(receiver));

    let sweeper = tokio::spawn(expiry_sweep(notification_repo.clone()));

    // Composition root for the notification API surface; controllers
    // mount these handles.
    let notifications = NotificationService::new(notification_repo, queue);
    let _factory = NotificationFactory::new(user_repo, profile_repo, notifications);

    tracing::info!("Delivery pipeline ready");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown signal: {e}")))?;

    tracing::info!("Shutdown signal received");
    consumer.abort();
    sweeper.abort();
    db.close().await;
    Ok(())
}

/// Periodically enforce `expires_at` deadlines in the record store.
async fn expiry_sweep(repo: Arc<NotificationRepository>) {
    let mut interval = tokio::time::interval(EXPIRY_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        match repo.delete_expired().await {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "Expired notifications removed"),
            Err(e) => tracing::error!(error = %e, "Expiry sweep failed"),
        }
    }
}
