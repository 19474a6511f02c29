// Weekly time-series rows for the equipment, maintenance and energy domains
use super::error::{DashboardError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tolerance used when checking a reported energy total against its categories
const TOTAL_TOLERANCE_KWH: f64 = 1e-6;

/// One calendar day of named metrics
pub trait MetricRow {
    fn date(&self) -> NaiveDate;

    /// Look up a metric by its key, `None` if the row does not carry it
    fn metric(&self, key: &str) -> Option<f64>;

    /// Row-level invariants, checked once when a `Dataset` is built
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Identifies a named metric within a row, independent of the domain.
///
/// Deserializes from either a bare key (`"chillers"`) or a table with an
/// explicit display label (`{ key = "chillers", label = "Chillers (kWh)" }`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSelector")]
pub struct MetricSelector {
    key: String,
    label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Key(String),
    Labeled { key: String, label: Option<String> },
}

impl From<RawSelector> for MetricSelector {
    fn from(raw: RawSelector) -> Self {
        match raw {
            RawSelector::Key(key) => MetricSelector::new(key),
            RawSelector::Labeled { key, label: None } => MetricSelector::new(key),
            RawSelector::Labeled {
                key,
                label: Some(label),
            } => MetricSelector::labeled(key, label),
        }
    }
}

impl MetricSelector {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
        }
    }

    pub fn labeled(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn read<R: MetricRow>(&self, row: &R) -> Result<f64> {
        row.metric(&self.key)
            .ok_or_else(|| DashboardError::UnknownMetric(self.key.clone()))
    }
}

/// Ordered, immutable window of rows. Dates are distinct and each row is
/// exactly one day after the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<R> {
    rows: Vec<R>,
}

impl<R: MetricRow> Dataset<R> {
    pub fn new(rows: Vec<R>) -> Result<Self> {
        for row in &rows {
            row.validate()?;
        }

        for pair in rows.windows(2) {
            let (prev, next) = (pair[0].date(), pair[1].date());
            if prev.succ_opt() != Some(next) {
                return Err(DashboardError::invalid_dataset(format!(
                    "dates must advance by exactly one day, got {} followed by {}",
                    prev, next
                )));
            }
        }

        Ok(Self { rows })
    }

    pub fn empty() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&R> {
        self.rows.last()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentRow {
    date: NaiveDate,
    uptime: BTreeMap<String, f64>,
}

impl EquipmentRow {
    /// Uptime percentage per equipment class
    pub fn new(date: NaiveDate, uptime: BTreeMap<String, f64>) -> Self {
        Self { date, uptime }
    }
}

impl MetricRow for EquipmentRow {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn metric(&self, key: &str) -> Option<f64> {
        self.uptime.get(key).copied()
    }

    fn validate(&self) -> Result<()> {
        for (class, pct) in &self.uptime {
            if !(0.0..=100.0).contains(pct) {
                return Err(DashboardError::invalid_dataset(format!(
                    "uptime for {} on {} is {}, expected 0-100",
                    class, self.date, pct
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceRow {
    pub date: NaiveDate,
    pub completed_work_orders: u32,
    pub pending_work_orders: u32,
    pub emergency_repairs: u32,
    pub preventive_maintenance: u32,
}

impl MaintenanceRow {
    pub const COMPLETED: &'static str = "completed_work_orders";
    pub const PENDING: &'static str = "pending_work_orders";
    pub const EMERGENCY: &'static str = "emergency_repairs";
    pub const PREVENTIVE: &'static str = "preventive_maintenance";

    pub fn new(
        date: NaiveDate,
        completed_work_orders: u32,
        pending_work_orders: u32,
        emergency_repairs: u32,
        preventive_maintenance: u32,
    ) -> Self {
        Self {
            date,
            completed_work_orders,
            pending_work_orders,
            emergency_repairs,
            preventive_maintenance,
        }
    }
}

impl MetricRow for MaintenanceRow {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn metric(&self, key: &str) -> Option<f64> {
        let count = match key {
            Self::COMPLETED => self.completed_work_orders,
            Self::PENDING => self.pending_work_orders,
            Self::EMERGENCY => self.emergency_repairs,
            Self::PREVENTIVE => self.preventive_maintenance,
            _ => return None,
        };
        Some(f64::from(count))
    }
}

/// Energy consumption per category. The total is always the sum of the
/// categories; a total reported by a provider is only checked, never kept.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRow {
    date: NaiveDate,
    consumption: BTreeMap<String, f64>,
    total: f64,
}

impl EnergyRow {
    pub const TOTAL: &'static str = "total";

    pub fn new(date: NaiveDate, consumption: BTreeMap<String, f64>) -> Self {
        let total = consumption.values().sum();
        Self {
            date,
            consumption,
            total,
        }
    }

    pub fn with_reported_total(
        date: NaiveDate,
        consumption: BTreeMap<String, f64>,
        reported_total: f64,
    ) -> Result<Self> {
        let row = Self::new(date, consumption);
        if !reported_total.is_finite()
            || (row.total - reported_total).abs() > TOTAL_TOLERANCE_KWH * row.total.max(1.0)
        {
            return Err(DashboardError::invalid_dataset(format!(
                "reported energy total {} on {} does not match category sum {}",
                reported_total, date, row.total
            )));
        }
        Ok(row)
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

impl MetricRow for EnergyRow {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn metric(&self, key: &str) -> Option<f64> {
        if key == Self::TOTAL {
            return Some(self.total);
        }
        self.consumption.get(key).copied()
    }

    fn validate(&self) -> Result<()> {
        if self.consumption.contains_key(Self::TOTAL) {
            return Err(DashboardError::invalid_dataset(
                "energy category may not be named 'total'",
            ));
        }
        for (category, kwh) in &self.consumption {
            if !kwh.is_finite() || *kwh < 0.0 {
                return Err(DashboardError::invalid_dataset(format!(
                    "energy for {} on {} is {}, expected a non-negative amount",
                    category, self.date, kwh
                )));
            }
        }
        Ok(())
    }
}
