// Chart-ready series handed to the renderer
use super::status::Status;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// One long-format observation: a (date, series label, value) triple
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeltedPoint {
    pub date: NaiveDate,
    pub series: String,
    pub value: f64,
}

impl MeltedPoint {
    pub fn new(date: NaiveDate, series: String, value: f64) -> Self {
        Self {
            date,
            series,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, points: Vec<TimeSeriesPoint>) -> Self {
        Self { id, name, points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    StackedBar,
}

/// Wide charts carry one series per metric, long charts carry melted
/// triples grouped contiguously by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "data", rename_all = "camelCase")]
pub enum ChartSeries {
    Wide(Vec<SeriesData>),
    Long(Vec<MeltedPoint>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub target: Option<f64>,
    pub series: ChartSeries,
}

impl ChartData {
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        kind: ChartKind,
        target: Option<f64>,
        series: ChartSeries,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            kind,
            target,
            series,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeData {
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub target: f64,
    pub axis_max: f64,
    pub status: Status,
    pub bands: Vec<GaugeBand>,
}
