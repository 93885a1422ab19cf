mod app;
mod cache;
mod config;
mod engine;
mod handlers;
mod provider;
mod scheduler;
mod state;
mod storage;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    engine::{ApiKeyGate, WeatherEngine},
    provider::WeatherApiClient,
    scheduler::spawn_refresh_job,
    state::AppState,
};

/// Havo - Current weather, cached in front of weatherapi.com
#[derive(Parser, Debug)]
#[command(name = "havo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "havo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let cache = cache::connect(&config)
        .await
        .context("failed to initialize cache")?;
    let accounts = storage::open(&config)
        .await
        .context("failed to initialize account store")?;

    if config.weatherapi_key.is_empty() {
        tracing::warn!("API_KEY_FOR_WEATHERAPI is not set, provider lookups will fail");
    }
    let provider = WeatherApiClient::new(
        &config.weatherapi_base_url,
        &config.weatherapi_key,
        config.provider_timeout(),
    )
    .context("failed to build provider client")?;

    let engine = WeatherEngine::new(cache, Arc::new(provider), config.engine_config());
    let state = AppState::new(engine.clone(), ApiKeyGate::new(accounts));

    let refresh_job = if config.refresh_enabled {
        Some(spawn_refresh_job(
            engine,
            config.refresh_interval(),
            state.shutdown.clone(),
        ))
    } else {
        tracing::info!("Cache refresh job disabled");
        None
    };

    let app = create_app(state.clone(), config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.shutdown.clone()))
        .await?;

    // Covers the server exiting on its own.
    state.signal_shutdown();
    if let Some(job) = refresh_job {
        if let Err(err) = job.await {
            tracing::error!(error = %err, "Cache refresh job panicked");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM) and stop background work.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    shutdown.cancel();
}
