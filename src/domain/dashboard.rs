// Dashboard presentation model
use super::alert::Alert;
use super::chart::{ChartData, GaugeData};
use super::status::Status;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCard {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub unit: String,
    pub target: String,
    pub status: Status,
}

/// Weekly work-order totals and the share of completed orders that were
/// not emergency repairs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSummary {
    pub completed: u64,
    pub pending: u64,
    pub emergency: u64,
    pub preventive: u64,
    pub efficiency_pct: i64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergySummary {
    pub target_kwh: f64,
    pub average_kwh: f64,
    pub cost_per_kwh: f64,
    pub daily_savings: f64,
    pub efficiency_vs_target_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub status_cards: Vec<StatusCard>,
    pub charts: Vec<ChartData>,
    pub energy_gauge: Option<GaugeData>,
    pub maintenance: Option<MaintenanceSummary>,
    pub energy: Option<EnergySummary>,
    pub alerts: Vec<Alert>,
}
