// Application layer - Use cases over the domain
pub mod alert_feed;
pub mod chart_transform;
pub mod dashboard_service;
pub mod data_provider;
pub mod metrics;
