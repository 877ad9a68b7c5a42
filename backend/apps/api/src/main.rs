//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! auth and ledger crates.

mod app;
mod config;

use std::net::SocketAddr;
use std::time::Duration;

use auth::InMemoryAuthRepository;
use auth::domain::repository::{LoginGuardRepository, TwoFactorChallengeRepository};
use platform::clock::{Clock, SystemClock};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{Services, build_router};
use crate::config::ServerConfig;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "inwista_api=info,auth=info,ledger=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let services = Services::new(config.demo_mode)?;
    if config.demo_mode {
        tracing::info!("Demo mode: seeded demo users and ledger");
    }

    spawn_sweeper(services.auth.clone());

    let app = build_router(&config, &services)?;

    // Start server
    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Periodically drop expired 2FA challenges and idle login guards
fn spawn_sweeper(repo: InMemoryAuthRepository) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let now = SystemClock.now();
            match repo.cleanup_expired(now).await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::debug!(challenges_deleted = removed, "2FA challenge cleanup completed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "2FA challenge cleanup failed, continuing anyway");
                }
            }
            if let Err(e) = repo.prune(now).await {
                tracing::warn!(error = %e, "Login guard pruning failed, continuing anyway");
            }
        }
    });
}
