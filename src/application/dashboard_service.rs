// Dashboard service - Use case for building dashboards
use crate::application::alert_feed::AlertFeed;
use crate::application::chart_transform::{gauge_bands, gauge_value, melt_wide, to_multi_series};
use crate::application::data_provider::{DataProvider, DatasetBundle};
use crate::application::metrics::{energy_summary, latest_value, maintenance_summary};
use crate::domain::alert::Alert;
use crate::domain::chart::{ChartData, ChartKind, ChartSeries, GaugeData};
use crate::domain::dashboard::{Dashboard, StatusCard};
use crate::domain::dataset::{Dataset, EnergyRow, MetricSelector};
use crate::domain::error::Result as DomainResult;
use crate::domain::status::classify;
use crate::infrastructure::config::{DashboardConfig, Domain, StatusCardConfig};
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    provider: Arc<dyn DataProvider>,
    alert_feed: Arc<dyn AlertFeed>,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        alert_feed: Arc<dyn AlertFeed>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            provider,
            alert_feed,
            config,
        }
    }

    pub async fn get_dashboard(&self) -> anyhow::Result<Dashboard> {
        let bundle = self
            .provider
            .load()
            .await
            .context("Failed to load datasets")?;

        let alerts = match self.alert_feed.active_alerts().await {
            Ok(alerts) => alerts,
            Err(e) => {
                tracing::warn!("Error fetching alerts: {:#}", e);
                Vec::new()
            }
        };

        Ok(self.assemble(&bundle, alerts))
    }

    /// Combine every widget for one rendering cycle. A widget whose inputs
    /// fail is logged and left out; the rest of the dashboard still renders.
    pub fn assemble(&self, bundle: &DatasetBundle, alerts: Vec<Alert>) -> Dashboard {
        let energy = &self.config.energy;

        let energy_summary = energy_summary(&bundle.energy, energy.target_kwh, energy.cost_per_kwh)
            .map_err(|e| tracing::warn!("Skipping energy summary: {}", e))
            .ok();

        let energy_gauge = self
            .build_gauge(&bundle.energy)
            .map_err(|e| tracing::warn!("Skipping energy gauge: {}", e))
            .ok();

        let dashboard = Dashboard {
            title: self.config.title.clone(),
            generated_at: Utc::now(),
            status_cards: self.build_status_cards(bundle),
            charts: self.build_charts(bundle),
            energy_gauge,
            maintenance: Some(maintenance_summary(
                &bundle.maintenance,
                &self.config.maintenance.efficiency,
            )),
            energy: energy_summary,
            alerts,
        };

        tracing::debug!(
            "Assembled dashboard with {} cards and {} charts",
            dashboard.status_cards.len(),
            dashboard.charts.len()
        );

        dashboard
    }

    fn build_status_cards(&self, bundle: &DatasetBundle) -> Vec<StatusCard> {
        let mut cards = Vec::new();

        for card_config in &self.config.status_cards {
            match Self::card_value(card_config, bundle) {
                Ok(value) => cards.push(StatusCard {
                    id: card_config.id.clone(),
                    label: card_config.label.clone(),
                    value,
                    unit: card_config.unit.clone(),
                    target: card_config.target.clone(),
                    status: classify(value, &card_config.threshold),
                }),
                Err(e) => {
                    tracing::warn!("Skipping status card {}: {}", card_config.id, e);
                }
            }
        }

        cards
    }

    fn card_value(card: &StatusCardConfig, bundle: &DatasetBundle) -> DomainResult<f64> {
        match card.domain {
            Domain::Equipment => latest_value(&bundle.equipment, &card.metric),
            Domain::Maintenance => latest_value(&bundle.maintenance, &card.metric),
            Domain::Energy => latest_value(&bundle.energy, &card.metric),
        }
    }

    fn build_charts(&self, bundle: &DatasetBundle) -> Vec<ChartData> {
        let mut charts = Vec::new();

        match to_multi_series(&bundle.equipment, &self.config.equipment.series) {
            Ok(series) => charts.push(ChartData::new(
                "equipment_uptime".to_string(),
                format!("Equipment Uptime - Last {} Days", bundle.equipment.len()),
                Some("%".to_string()),
                ChartKind::Line,
                Some(self.config.equipment.target_uptime),
                ChartSeries::Wide(series),
            )),
            Err(e) => tracing::warn!("Skipping equipment uptime chart: {}", e),
        }

        match to_multi_series(&bundle.maintenance, &self.config.maintenance.series) {
            Ok(series) => charts.push(ChartData::new(
                "work_orders".to_string(),
                format!(
                    "Work Order Status - Last {} Days",
                    bundle.maintenance.len()
                ),
                Some("work orders".to_string()),
                ChartKind::StackedBar,
                None,
                ChartSeries::Wide(series),
            )),
            Err(e) => tracing::warn!("Skipping work order chart: {}", e),
        }

        match melt_wide(&bundle.energy, &self.config.energy.categories) {
            Ok(points) => charts.push(ChartData::new(
                "energy_consumption".to_string(),
                "Energy Consumption by Equipment".to_string(),
                Some("kWh".to_string()),
                ChartKind::StackedBar,
                None,
                ChartSeries::Long(points),
            )),
            Err(e) => tracing::warn!("Skipping energy consumption chart: {}", e),
        }

        charts
    }

    fn build_gauge(&self, energy: &Dataset<EnergyRow>) -> DomainResult<GaugeData> {
        let settings = &self.config.energy;
        let value = gauge_value(energy, &MetricSelector::new(EnergyRow::TOTAL))?;

        Ok(GaugeData {
            title: "Average Daily Energy".to_string(),
            unit: "kWh".to_string(),
            value,
            target: settings.target_kwh,
            axis_max: settings.axis_max,
            status: classify(value, &settings.gauge),
            bands: gauge_bands(&settings.gauge, settings.axis_max)?,
        })
    }
}
