// Weekly aggregates over a dataset
//
// Every function here is a pure computation over an immutable dataset, so
// callers may evaluate independent datasets concurrently without locking.
use crate::domain::dashboard::{EnergySummary, MaintenanceSummary};
use crate::domain::dataset::{Dataset, EnergyRow, MaintenanceRow, MetricRow, MetricSelector};
use crate::domain::error::{DashboardError, Result};
use crate::domain::status::{classify, ThresholdConfig};

/// Metric value from the most recent row
pub fn latest_value<R: MetricRow>(dataset: &Dataset<R>, selector: &MetricSelector) -> Result<f64> {
    let row = dataset.last().ok_or(DashboardError::EmptyDataset)?;
    selector.read(row)
}

/// Sum over every row; an empty dataset sums to zero
pub fn weekly_total<R: MetricRow>(dataset: &Dataset<R>, selector: &MetricSelector) -> Result<f64> {
    dataset
        .rows()
        .iter()
        .map(|row| selector.read(row))
        .sum()
}

pub fn weekly_average<R: MetricRow>(
    dataset: &Dataset<R>,
    selector: &MetricSelector,
) -> Result<f64> {
    if dataset.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }
    Ok(weekly_total(dataset, selector)? / dataset.len() as f64)
}

/// Percentage of completed work orders that were not emergency repairs,
/// rounded to the nearest integer with ties to even (62.5 -> 62, 87.5 -> 88).
/// The ratio is taken before scaling, so a share like 23/40 lands just under
/// 57.5 and rounds to 57.
/// No completed orders counts as 0% rather than undefined. More emergencies
/// than completions yields a negative percentage.
pub fn maintenance_efficiency(dataset: &Dataset<MaintenanceRow>) -> i64 {
    let completed: u64 = dataset
        .rows()
        .iter()
        .map(|row| u64::from(row.completed_work_orders))
        .sum();
    let emergency: u64 = dataset
        .rows()
        .iter()
        .map(|row| u64::from(row.emergency_repairs))
        .sum();

    if completed == 0 {
        return 0;
    }

    let pct = (completed as f64 - emergency as f64) / completed as f64 * 100.0;
    pct.round_ties_even() as i64
}

/// Daily cost saved by running below the energy target. Zero when the
/// weekly average is at or above target.
pub fn projected_daily_savings(
    dataset: &Dataset<EnergyRow>,
    target_kwh: f64,
    cost_per_kwh: f64,
) -> Result<f64> {
    if !target_kwh.is_finite() {
        return Err(DashboardError::invalid_config("energy target must be finite"));
    }
    if !cost_per_kwh.is_finite() || cost_per_kwh < 0.0 {
        return Err(DashboardError::invalid_config(format!(
            "cost per kWh must be a non-negative amount, got {}",
            cost_per_kwh
        )));
    }

    let average = weekly_average(dataset, &MetricSelector::new(EnergyRow::TOTAL))?;
    if average < target_kwh {
        Ok((target_kwh - average) * cost_per_kwh)
    } else {
        Ok(0.0)
    }
}

/// How far an average sits below its target, as a percentage of the target
/// rounded to one decimal place. Rounding works on the stored binary value,
/// so a percentage computed as just above 99.65 becomes 99.7. Negative when
/// the average overshoots.
pub fn efficiency_against_target(average: f64, target: f64) -> Result<f64> {
    if target == 0.0 {
        return Err(DashboardError::invalid_config("target must be non-zero"));
    }
    let pct = (target - average) / target * 100.0;
    round_to_tenth(pct)
}

/// Decimal formatting rounds the exact binary expansion, ties to even
fn round_to_tenth(value: f64) -> Result<f64> {
    format!("{:.1}", value).parse::<f64>().map_err(|_| {
        DashboardError::invalid_config(format!("cannot round {} to one decimal", value))
    })
}

pub fn maintenance_summary(
    dataset: &Dataset<MaintenanceRow>,
    efficiency_threshold: &ThresholdConfig,
) -> MaintenanceSummary {
    let total = |count: fn(&MaintenanceRow) -> u32| -> u64 {
        dataset.rows().iter().map(|row| u64::from(count(row))).sum()
    };

    let efficiency_pct = maintenance_efficiency(dataset);

    MaintenanceSummary {
        completed: total(|row| row.completed_work_orders),
        pending: total(|row| row.pending_work_orders),
        emergency: total(|row| row.emergency_repairs),
        preventive: total(|row| row.preventive_maintenance),
        efficiency_pct,
        status: classify(efficiency_pct as f64, efficiency_threshold),
    }
}

pub fn energy_summary(
    dataset: &Dataset<EnergyRow>,
    target_kwh: f64,
    cost_per_kwh: f64,
) -> Result<EnergySummary> {
    let average_kwh = weekly_average(dataset, &MetricSelector::new(EnergyRow::TOTAL))?;

    Ok(EnergySummary {
        target_kwh,
        average_kwh,
        cost_per_kwh,
        daily_savings: projected_daily_savings(dataset, target_kwh, cost_per_kwh)?,
        efficiency_vs_target_pct: efficiency_against_target(average_kwh, target_kwh)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::Status;
    use crate::infrastructure::sample_provider::reference_week;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    const EPS: f64 = 1e-9;

    fn end_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 7).unwrap()
    }

    fn maintenance(counts: &[(u32, u32)]) -> Dataset<MaintenanceRow> {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let rows = counts
            .iter()
            .enumerate()
            .map(|(i, &(completed, emergency))| {
                MaintenanceRow::new(start + chrono::Days::new(i as u64), completed, 0, emergency, 0)
            })
            .collect();
        Dataset::new(rows).unwrap()
    }

    fn energy_totals(start: NaiveDate, totals: &[f64]) -> Dataset<EnergyRow> {
        let rows = totals
            .iter()
            .enumerate()
            .map(|(i, &kwh)| {
                EnergyRow::new(
                    start + chrono::Days::new(i as u64),
                    BTreeMap::from([("plant".to_string(), kwh)]),
                )
            })
            .collect();
        Dataset::new(rows).unwrap()
    }

    #[test]
    fn test_latest_value() {
        let bundle = reference_week(end_date()).unwrap();
        let chillers = MetricSelector::new("chillers");
        assert_eq!(latest_value(&bundle.equipment, &chillers).unwrap(), 99.0);
        assert_eq!(
            latest_value(&bundle.maintenance, &MetricSelector::new(MaintenanceRow::EMERGENCY))
                .unwrap(),
            0.0
        );
        assert_eq!(
            latest_value(&bundle.energy, &MetricSelector::new(EnergyRow::TOTAL)).unwrap(),
            8800.0
        );
    }

    #[test]
    fn test_empty_dataset_behaviour() {
        let empty: Dataset<EnergyRow> = Dataset::empty();
        let total = MetricSelector::new(EnergyRow::TOTAL);
        assert_eq!(weekly_total(&empty, &total).unwrap(), 0.0);
        assert_eq!(latest_value(&empty, &total), Err(DashboardError::EmptyDataset));
        assert_eq!(weekly_average(&empty, &total), Err(DashboardError::EmptyDataset));
        assert_eq!(
            projected_daily_savings(&empty, 9500.0, 0.12),
            Err(DashboardError::EmptyDataset)
        );
    }

    #[test]
    fn test_unknown_metric_propagates() {
        let bundle = reference_week(end_date()).unwrap();
        let missing = MetricSelector::new("boilers");
        assert_eq!(
            weekly_total(&bundle.equipment, &missing),
            Err(DashboardError::UnknownMetric("boilers".to_string()))
        );
    }

    #[test]
    fn test_weekly_energy_average() {
        let bundle = reference_week(end_date()).unwrap();
        let total = MetricSelector::new(EnergyRow::TOTAL);
        assert!((weekly_total(&bundle.energy, &total).unwrap() - 65450.0).abs() < EPS);
        assert!((weekly_average(&bundle.energy, &total).unwrap() - 9350.0).abs() < EPS);
    }

    #[test]
    fn test_average_is_total_over_count() {
        let bundle = reference_week(end_date()).unwrap();
        for key in ["chillers", "compressors", "generators", "production_line"] {
            let selector = MetricSelector::new(key);
            let total = weekly_total(&bundle.equipment, &selector).unwrap();
            let average = weekly_average(&bundle.equipment, &selector).unwrap();
            assert!((average - total / bundle.equipment.len() as f64).abs() < EPS);
        }
    }

    #[test]
    fn test_weekly_total_is_additive() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let first = [100.0, 250.5, 75.25];
        let second = [10.0, 20.0];
        let joined: Vec<f64> = first.iter().chain(second.iter()).copied().collect();

        let a = energy_totals(start, &first);
        let b = energy_totals(start + chrono::Days::new(3), &second);
        let ab = energy_totals(start, &joined);

        let total = MetricSelector::new(EnergyRow::TOTAL);
        let sum = weekly_total(&a, &total).unwrap() + weekly_total(&b, &total).unwrap();
        assert!((weekly_total(&ab, &total).unwrap() - sum).abs() < EPS);
    }

    #[test]
    fn test_maintenance_efficiency_reference_week() {
        let bundle = reference_week(end_date()).unwrap();
        // (91 - 13) / 91 = 85.7%
        assert_eq!(maintenance_efficiency(&bundle.maintenance), 86);
    }

    #[test]
    fn test_maintenance_efficiency_zero_completed() {
        assert_eq!(maintenance_efficiency(&maintenance(&[(0, 3), (0, 5)])), 0);
        assert_eq!(maintenance_efficiency(&Dataset::empty()), 0);
    }

    #[test]
    fn test_maintenance_efficiency_rounds_ties_to_even() {
        // 5 / 8 = 62.5% -> 62, 7 / 8 = 87.5% -> 88
        assert_eq!(maintenance_efficiency(&maintenance(&[(8, 3)])), 62);
        assert_eq!(maintenance_efficiency(&maintenance(&[(8, 1)])), 88);
    }

    #[test]
    fn test_maintenance_efficiency_divides_before_scaling() {
        // 23 / 40 * 100 evaluates to 57.49999999999999
        assert_eq!(maintenance_efficiency(&maintenance(&[(40, 17)])), 57);
        assert_eq!(maintenance_efficiency(&maintenance(&[(20, 8), (20, 9)])), 57);
    }

    #[test]
    fn test_maintenance_efficiency_negative() {
        assert_eq!(maintenance_efficiency(&maintenance(&[(2, 5)])), -150);
    }

    #[test]
    fn test_projected_daily_savings_reference_week() {
        let bundle = reference_week(end_date()).unwrap();
        let savings = projected_daily_savings(&bundle.energy, 9500.0, 0.12).unwrap();
        assert!((savings - 18.0).abs() < EPS);
    }

    #[test]
    fn test_projected_daily_savings_at_or_above_target() {
        let bundle = reference_week(end_date()).unwrap();
        assert_eq!(projected_daily_savings(&bundle.energy, 9350.0, 0.12).unwrap(), 0.0);
        assert_eq!(projected_daily_savings(&bundle.energy, 9000.0, 0.12).unwrap(), 0.0);
    }

    #[test]
    fn test_projected_daily_savings_monotonic() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut previous = 0.0;
        for average in [9400.0, 9200.0, 8000.0, 5000.0] {
            let dataset = energy_totals(start, &[average, average]);
            let savings = projected_daily_savings(&dataset, 9500.0, 0.12).unwrap();
            assert!(savings > previous);
            previous = savings;
        }
    }

    #[test]
    fn test_projected_daily_savings_rejects_bad_cost() {
        let bundle = reference_week(end_date()).unwrap();
        assert!(matches!(
            projected_daily_savings(&bundle.energy, 9500.0, -0.12),
            Err(DashboardError::InvalidConfig(_))
        ));
        assert!(projected_daily_savings(&bundle.energy, f64::NAN, 0.12).is_err());
    }

    #[test]
    fn test_efficiency_against_target() {
        assert_eq!(efficiency_against_target(9350.0, 9500.0).unwrap(), 1.6);
        assert_eq!(efficiency_against_target(11400.0, 9500.0).unwrap(), -20.0);
        assert_eq!(efficiency_against_target(0.0, 50.0).unwrap(), 100.0);
        assert_eq!(efficiency_against_target(9500.0, 9500.0).unwrap(), 0.0);
        assert!(matches!(
            efficiency_against_target(9350.0, 0.0),
            Err(DashboardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_efficiency_against_target_rounds_stored_value() {
        // 996.5 / 1000 * 100 lands just above 99.65
        assert_eq!(efficiency_against_target(3.5, 1000.0).unwrap(), 99.7);
    }

    #[test]
    fn test_maintenance_summary() {
        let bundle = reference_week(end_date()).unwrap();
        let threshold = ThresholdConfig::higher_is_better(80.0, 70.0).unwrap();
        let summary = maintenance_summary(&bundle.maintenance, &threshold);
        assert_eq!(summary.completed, 91);
        assert_eq!(summary.pending, 47);
        assert_eq!(summary.emergency, 13);
        assert_eq!(summary.preventive, 50);
        assert_eq!(summary.efficiency_pct, 86);
        assert_eq!(summary.status, Status::Normal);
    }

    #[test]
    fn test_energy_summary() {
        let bundle = reference_week(end_date()).unwrap();
        let summary = energy_summary(&bundle.energy, 9500.0, 0.12).unwrap();
        assert!((summary.average_kwh - 9350.0).abs() < EPS);
        assert!((summary.daily_savings - 18.0).abs() < EPS);
        assert_eq!(summary.efficiency_vs_target_pct, 1.6);
    }
}
