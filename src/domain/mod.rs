// Domain layer - Value types and pure classification rules
pub mod alert;
pub mod chart;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod status;
