use crate::application::chart_transform::gauge_bands;
use crate::domain::alert::Alert;
use crate::domain::dataset::MetricSelector;
use crate::domain::error::DashboardError;
use crate::domain::status::ThresholdConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Where the weekly datasets come from
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderSettings {
    #[default]
    Sample,
    Http {
        url: String,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub title: String,
    #[serde(default)]
    pub status_cards: Vec<StatusCardConfig>,
    pub equipment: EquipmentSettings,
    pub maintenance: MaintenanceSettings,
    pub energy: EnergySettings,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Equipment,
    Maintenance,
    Energy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusCardConfig {
    pub id: String,
    pub label: String,
    pub domain: Domain,
    pub metric: MetricSelector,
    #[serde(default)]
    pub unit: String,
    pub target: String,
    pub threshold: ThresholdConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EquipmentSettings {
    pub target_uptime: f64,
    pub series: Vec<MetricSelector>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MaintenanceSettings {
    pub efficiency: ThresholdConfig,
    pub series: Vec<MetricSelector>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EnergySettings {
    pub target_kwh: f64,
    pub cost_per_kwh: f64,
    pub axis_max: f64,
    pub gauge: ThresholdConfig,
    pub categories: Vec<MetricSelector>,
}

impl DashboardConfig {
    /// Checks that can only be made across fields, run once at load time
    pub fn validate(&self) -> Result<(), DashboardError> {
        let energy = &self.energy;
        if !energy.target_kwh.is_finite() || energy.target_kwh <= 0.0 {
            return Err(DashboardError::invalid_config(format!(
                "energy target must be positive, got {}",
                energy.target_kwh
            )));
        }
        if !energy.cost_per_kwh.is_finite() || energy.cost_per_kwh < 0.0 {
            return Err(DashboardError::invalid_config(format!(
                "cost per kWh must be non-negative, got {}",
                energy.cost_per_kwh
            )));
        }
        gauge_bands(&energy.gauge, energy.axis_max)?;

        if !(0.0..=100.0).contains(&self.equipment.target_uptime) {
            return Err(DashboardError::invalid_config(format!(
                "uptime target must be a percentage, got {}",
                self.equipment.target_uptime
            )));
        }

        let mut ids = std::collections::HashSet::new();
        for card in &self.status_cards {
            if !ids.insert(card.id.as_str()) {
                return Err(DashboardError::invalid_config(format!(
                    "duplicate status card id '{}'",
                    card.id
                )));
            }
        }

        Ok(())
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    into_app_config(settings)
}

fn into_app_config(settings: config::Config) -> anyhow::Result<AppConfig> {
    let app: AppConfig = settings.try_deserialize()?;
    app.dashboard.validate()?;
    Ok(app)
}
