// Data provider trait for the weekly datasets
use crate::domain::dataset::{Dataset, EnergyRow, EquipmentRow, MaintenanceRow};
use async_trait::async_trait;

/// The three domain datasets for one rendering cycle
#[derive(Debug, Clone)]
pub struct DatasetBundle {
    pub equipment: Dataset<EquipmentRow>,
    pub maintenance: Dataset<MaintenanceRow>,
    pub energy: Dataset<EnergyRow>,
}

#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Load the current window. Implementations validate rows into
    /// `Dataset`s before returning, so consumers never re-check ordering.
    async fn load(&self) -> anyhow::Result<DatasetBundle>;
}
