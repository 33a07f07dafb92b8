use anyhow::{Context, Result};
use crop_assistant::config::Config;
use crop_assistant::server::build_router;
use crop_assistant::session::SessionController;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the environment is set directly)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("crop_assistant=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting crop assistant against backend {}", config.api_base_url);

    let port = config.port;
    let controller = Arc::new(SessionController::new(config));
    let app = build_router(controller);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Session API listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Session API server stopped")?;

    Ok(())
}
