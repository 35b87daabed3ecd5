use journal::config::Config;
use journal::services::PricePoller;
use journal::{api, AppState};

use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Starting journal server on {}:{}", config.host, config.port);

    // Create application state
    let state = AppState::from_config(config);

    // Start live price polling for the watched pairs
    let poller = PricePoller::start(
        state.market.clone(),
        state.price_cache.clone(),
        state.config.watched_pairs.clone(),
        Duration::from_secs(state.config.poll_interval_secs),
    );

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = api::router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start the server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Journal server listening on {}", addr);

    axum::serve(listener, app).await?;

    poller.stop();
    Ok(())
}
