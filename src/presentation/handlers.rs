// HTTP request handlers
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard as JSON
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard_service.get_dashboard().await {
        Ok(dashboard) => Json(dashboard).into_response(),
        Err(e) => {
            tracing::error!("Error building dashboard: {:#}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "dashboard data unavailable" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::alert_feed::StaticAlertFeed;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::data_provider::{DataProvider, DatasetBundle};
    use crate::infrastructure::config::AppConfig;
    use crate::infrastructure::sample_provider::SampleDataProvider;
    use async_trait::async_trait;

    struct DownProvider;

    #[async_trait]
    impl DataProvider for DownProvider {
        async fn load(&self) -> anyhow::Result<DatasetBundle> {
            anyhow::bail!("upstream timed out")
        }
    }

    fn state(provider: Arc<dyn DataProvider>) -> Arc<AppState> {
        let app: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                include_str!("../../config/dashboard.toml"),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        Arc::new(AppState {
            dashboard_service: DashboardService::new(
                provider,
                Arc::new(StaticAlertFeed::default()),
                app.dashboard,
            ),
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        assert_eq!(health_check().await, "ok");
    }

    #[tokio::test]
    async fn test_get_dashboard_ok() {
        let response = get_dashboard(State(state(Arc::new(SampleDataProvider::new())))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_dashboard_unavailable() {
        let response = get_dashboard(State(state(Arc::new(DownProvider)))).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
