// Reshape datasets into chart series
use crate::application::metrics::weekly_average;
use crate::domain::chart::{GaugeBand, MeltedPoint, SeriesData, TimeSeriesPoint};
use crate::domain::dataset::{Dataset, MetricRow, MetricSelector};
use crate::domain::error::{DashboardError, Result};
use crate::domain::status::{Direction, Status, ThresholdConfig};
use std::collections::HashSet;

/// One series per selector, in selector order, each following row order.
/// Selectors must name distinct metrics.
pub fn to_multi_series<R: MetricRow>(
    dataset: &Dataset<R>,
    selectors: &[MetricSelector],
) -> Result<Vec<SeriesData>> {
    ensure_distinct(selectors)?;

    selectors
        .iter()
        .map(|selector| {
            let points = dataset
                .rows()
                .iter()
                .map(|row| Ok(TimeSeriesPoint::new(row.date(), selector.read(row)?)))
                .collect::<Result<Vec<_>>>()?;
            Ok(SeriesData::new(
                selector.key().to_string(),
                selector.label().to_string(),
                points,
            ))
        })
        .collect()
}

/// Wide to long reshape. Output is row-major: every selector for the first
/// date, then every selector for the next, so stacked renderers see each
/// date as one contiguous group.
pub fn melt_wide<R: MetricRow>(
    dataset: &Dataset<R>,
    selectors: &[MetricSelector],
) -> Result<Vec<MeltedPoint>> {
    let mut melted = Vec::with_capacity(dataset.len() * selectors.len());

    for row in dataset.rows() {
        for selector in selectors {
            melted.push(MeltedPoint::new(
                row.date(),
                selector.label().to_string(),
                selector.read(row)?,
            ));
        }
    }

    Ok(melted)
}

/// Value shown on a gauge: the weekly average of the metric
pub fn gauge_value<R: MetricRow>(dataset: &Dataset<R>, selector: &MetricSelector) -> Result<f64> {
    weekly_average(dataset, selector)
}

/// Gauge bands from zero to `axis_max`, one per status, laid out along the
/// axis in ascending order.
pub fn gauge_bands(threshold: &ThresholdConfig, axis_max: f64) -> Result<Vec<GaugeBand>> {
    let normal = threshold.normal_boundary();
    let warning = threshold.warning_boundary();
    let lowest = normal.min(warning);

    if lowest < 0.0 || !(axis_max >= normal.max(warning)) {
        return Err(DashboardError::invalid_config(format!(
            "gauge axis 0..{} does not cover thresholds {} and {}",
            axis_max, normal, warning
        )));
    }

    let bands = match threshold.direction() {
        Direction::LowerIsBetter => vec![
            GaugeBand { from: 0.0, to: normal, status: Status::Normal },
            GaugeBand { from: normal, to: warning, status: Status::Warning },
            GaugeBand { from: warning, to: axis_max, status: Status::Critical },
        ],
        Direction::HigherIsBetter => vec![
            GaugeBand { from: 0.0, to: warning, status: Status::Critical },
            GaugeBand { from: warning, to: normal, status: Status::Warning },
            GaugeBand { from: normal, to: axis_max, status: Status::Normal },
        ],
    };

    Ok(bands)
}

fn ensure_distinct(selectors: &[MetricSelector]) -> Result<()> {
    let mut seen = HashSet::new();
    for selector in selectors {
        if !seen.insert(selector.key()) {
            return Err(DashboardError::invalid_config(format!(
                "metric '{}' requested more than once",
                selector.key()
            )));
        }
    }
    Ok(())
}
