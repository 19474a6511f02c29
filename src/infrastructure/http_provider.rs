// HTTP data provider - fetches the weekly datasets as JSON
use crate::application::data_provider::{DataProvider, DatasetBundle};
use crate::domain::dataset::{Dataset, EnergyRow, EquipmentRow, MaintenanceRow};
use crate::domain::error::Result as DomainResult;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct HttpDataProvider {
    url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct WeekPayload {
    #[serde(default)]
    equipment: Vec<EquipmentRecord>,
    #[serde(default)]
    maintenance: Vec<MaintenanceRecord>,
    #[serde(default)]
    energy: Vec<EnergyRecord>,
}

#[derive(Debug, Deserialize)]
struct EquipmentRecord {
    date: NaiveDate,
    uptime: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct MaintenanceRecord {
    date: NaiveDate,
    completed_work_orders: u32,
    pending_work_orders: u32,
    emergency_repairs: u32,
    preventive_maintenance: u32,
}

#[derive(Debug, Deserialize)]
struct EnergyRecord {
    date: NaiveDate,
    consumption: BTreeMap<String, f64>,
    #[serde(default)]
    total: Option<f64>,
}

impl WeekPayload {
    fn into_bundle(self) -> DomainResult<DatasetBundle> {
        let equipment = self
            .equipment
            .into_iter()
            .map(|r| EquipmentRow::new(r.date, r.uptime))
            .collect();

        let maintenance = self
            .maintenance
            .into_iter()
            .map(|r| {
                MaintenanceRow::new(
                    r.date,
                    r.completed_work_orders,
                    r.pending_work_orders,
                    r.emergency_repairs,
                    r.preventive_maintenance,
                )
            })
            .collect();

        let energy = self
            .energy
            .into_iter()
            .map(|r| match r.total {
                Some(total) => EnergyRow::with_reported_total(r.date, r.consumption, total),
                None => Ok(EnergyRow::new(r.date, r.consumption)),
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(DatasetBundle {
            equipment: Dataset::new(equipment)?,
            maintenance: Dataset::new(maintenance)?,
            energy: Dataset::new(energy)?,
        })
    }
}

impl HttpDataProvider {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DataProvider for HttpDataProvider {
    async fn load(&self) -> Result<DatasetBundle> {
        tracing::debug!("Fetching datasets from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to data provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Data provider returned status {}: {}", status, body);
        }

        let payload = response
            .json::<WeekPayload>()
            .await
            .context("Failed to parse data provider response")?;

        let bundle = payload
            .into_bundle()
            .context("Data provider returned an invalid week")?;

        tracing::debug!(
            "Loaded {} equipment, {} maintenance and {} energy rows",
            bundle.equipment.len(),
            bundle.maintenance.len(),
            bundle.energy.len()
        );

        Ok(bundle)
    }
}
