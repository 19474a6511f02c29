// Alert feed - Source of alert records shown next to the dashboard
use crate::domain::alert::Alert;
use async_trait::async_trait;

/// Anything able to produce the current alert list. A rules engine
/// evaluating conditions over the datasets would implement this too.
#[async_trait]
pub trait AlertFeed: Send + Sync {
    async fn active_alerts(&self) -> anyhow::Result<Vec<Alert>>;
}

/// Serves a fixed list of alerts taken from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticAlertFeed {
    alerts: Vec<Alert>,
}

impl StaticAlertFeed {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }
}

#[async_trait]
impl AlertFeed for StaticAlertFeed {
    async fn active_alerts(&self) -> anyhow::Result<Vec<Alert>> {
        // High severity first, configured order otherwise
        let mut alerts = self.alerts.clone();
        alerts.sort_by_key(|alert| !alert.is_high());
        Ok(alerts)
    }
}
