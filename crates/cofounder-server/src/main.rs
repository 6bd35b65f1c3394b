mod config;
mod error;
mod server;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cofounder_common::gemini::GeminiClient;
use cofounder_common::generator::TextGenerator;

use config::Config;
use error::AppError;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting cofounder API server");

    let config = Config::from_env()?;
    info!(
        host = %config.host,
        port = config.port,
        gemini_key = config.gemini.is_some(),
        "configuration loaded"
    );

    let generator: Option<Arc<dyn TextGenerator>> = match config.gemini.clone() {
        Some(gemini_config) => {
            info!(
                base_url = %gemini_config.base_url,
                model = %gemini_config.model,
                timeout_ms = gemini_config.timeout.as_millis(),
                "gemini client configured"
            );
            let client: Arc<dyn TextGenerator> =
                Arc::new(GeminiClient::new(gemini_config).map_err(AppError::from)?);
            Some(client)
        }
        None => {
            warn!("GEMINI_API_KEY not set, generation requests will fail until it is configured");
            None
        }
    };

    let router = server::build_router(AppState::new(generator));

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(AppError::from)?;
    info!(addr = %listener.local_addr()?, "HTTP server ready");
    info!("health check at /api/health");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
