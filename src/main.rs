use copper_actions::config::Config;
use copper_actions::copper_client::CopperClient;
use copper_actions::handlers::{self, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes logging, loads configuration, builds the Copper client and
/// serves the action endpoints.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "copper_actions=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let copper = CopperClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize Copper client: {}", e))?;
    tracing::info!("✓ Copper client initialized: {}", copper.base_url());

    let app_state = Arc::new(AppState {
        config: config.clone(),
        copper,
    });
    let app = handlers::router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
