// Built-in reference week, used when no live source is configured
use crate::application::data_provider::{DataProvider, DatasetBundle};
use crate::domain::dataset::{Dataset, EnergyRow, EquipmentRow, MaintenanceRow};
use crate::domain::error::{DashboardError, Result};
use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use std::collections::BTreeMap;

const DAYS: usize = 7;

const CHILLERS: [f64; DAYS] = [98.0, 97.0, 99.0, 96.0, 97.0, 95.0, 99.0];
const COMPRESSORS: [f64; DAYS] = [92.0, 94.0, 91.0, 95.0, 93.0, 96.0, 97.0];
const GENERATORS: [f64; DAYS] = [100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 99.0];
const PRODUCTION_LINE: [f64; DAYS] = [95.0, 94.0, 96.0, 92.0, 93.0, 90.0, 97.0];

const COMPLETED: [u32; DAYS] = [12, 15, 14, 11, 13, 10, 16];
const PENDING: [u32; DAYS] = [8, 6, 7, 9, 5, 8, 4];
const EMERGENCY: [u32; DAYS] = [2, 1, 3, 2, 1, 4, 0];
const PREVENTIVE: [u32; DAYS] = [7, 8, 6, 9, 7, 5, 8];

const CHILLERS_KWH: [f64; DAYS] = [4200.0, 4350.0, 4100.0, 4450.0, 4300.0, 4600.0, 4000.0];
const COMPRESSORS_KWH: [f64; DAYS] = [3800.0, 3950.0, 3700.0, 4000.0, 3850.0, 4150.0, 3600.0];
const LIGHTING_KWH: [f64; DAYS] = [1200.0; DAYS];
const TOTAL_KWH: [f64; DAYS] = [9200.0, 9500.0, 9000.0, 9650.0, 9350.0, 9950.0, 8800.0];

/// The reference week ending on `end`, inclusive
pub fn reference_week(end: NaiveDate) -> Result<DatasetBundle> {
    let start = end
        .checked_sub_days(Days::new(DAYS as u64 - 1))
        .ok_or_else(|| DashboardError::invalid_dataset(format!("no week ends on {}", end)))?;
    let dates: Vec<NaiveDate> = (0..DAYS as u64)
        .map(|i| start + Days::new(i))
        .collect();

    let equipment = dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            EquipmentRow::new(
                date,
                BTreeMap::from([
                    ("chillers".to_string(), CHILLERS[i]),
                    ("compressors".to_string(), COMPRESSORS[i]),
                    ("generators".to_string(), GENERATORS[i]),
                    ("production_line".to_string(), PRODUCTION_LINE[i]),
                ]),
            )
        })
        .collect();

    let maintenance = dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            MaintenanceRow::new(date, COMPLETED[i], PENDING[i], EMERGENCY[i], PREVENTIVE[i])
        })
        .collect();

    let energy = dates
        .iter()
        .enumerate()
        .map(|(i, &date)| {
            EnergyRow::with_reported_total(
                date,
                BTreeMap::from([
                    ("chillers".to_string(), CHILLERS_KWH[i]),
                    ("compressors".to_string(), COMPRESSORS_KWH[i]),
                    ("lighting".to_string(), LIGHTING_KWH[i]),
                ]),
                TOTAL_KWH[i],
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DatasetBundle {
        equipment: Dataset::new(equipment)?,
        maintenance: Dataset::new(maintenance)?,
        energy: Dataset::new(energy)?,
    })
}

/// Serves the reference week, ending today unless pinned to a date
#[derive(Debug, Clone, Default)]
pub struct SampleDataProvider {
    end_date: Option<NaiveDate>,
}

impl SampleDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ending_on(end_date: NaiveDate) -> Self {
        Self {
            end_date: Some(end_date),
        }
    }
}

#[async_trait]
impl DataProvider for SampleDataProvider {
    async fn load(&self) -> anyhow::Result<DatasetBundle> {
        let end = self
            .end_date
            .unwrap_or_else(|| Local::now().date_naive());
        tracing::debug!("Serving reference week ending {}", end);
        Ok(reference_week(end)?)
    }
}
