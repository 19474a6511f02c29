// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use operations_dashboard::application::alert_feed::StaticAlertFeed;
use operations_dashboard::application::dashboard_service::DashboardService;
use operations_dashboard::application::data_provider::DataProvider;
use operations_dashboard::infrastructure::config::{load_app_config, ProviderSettings};
use operations_dashboard::infrastructure::http_provider::HttpDataProvider;
use operations_dashboard::infrastructure::sample_provider::SampleDataProvider;
use operations_dashboard::presentation::app_state::AppState;
use operations_dashboard::presentation::handlers::{get_dashboard, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let app_config = load_app_config().context("Failed to load config/dashboard")?;

    // Create data provider (infrastructure layer)
    let provider: Arc<dyn DataProvider> = match &app_config.provider {
        ProviderSettings::Sample => Arc::new(SampleDataProvider::new()),
        ProviderSettings::Http { url } => Arc::new(HttpDataProvider::new(url.clone())),
    };
    let alert_feed = Arc::new(StaticAlertFeed::new(app_config.dashboard.alerts.clone()));

    // Create services (application layer)
    let dashboard_service = DashboardService::new(provider, alert_feed, app_config.dashboard);

    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", app_config.server.bind_address))?;
    tracing::info!("Starting operations-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
