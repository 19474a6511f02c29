// Threshold classification of metric values
use super::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health of a single metric. The renderer maps each variant to its own
/// presentation; no colors are carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Warning,
    Critical,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

impl FromStr for Direction {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "higher-is-better" => Ok(Direction::HigherIsBetter),
            "lower-is-better" => Ok(Direction::LowerIsBetter),
            other => Err(DashboardError::invalid_config(format!(
                "unrecognized threshold direction '{}'",
                other
            ))),
        }
    }
}

/// Boundaries for one metric. Construction rejects pairs ordered against
/// the direction, so `classify` never sees a warning band looser than the
/// normal band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawThreshold")]
pub struct ThresholdConfig {
    #[serde(rename = "normal")]
    normal_boundary: f64,
    #[serde(rename = "warning")]
    warning_boundary: f64,
    direction: Direction,
}

#[derive(Deserialize)]
struct RawThreshold {
    normal: f64,
    warning: f64,
    #[serde(default)]
    direction: Option<String>,
}

impl TryFrom<RawThreshold> for ThresholdConfig {
    type Error = DashboardError;

    fn try_from(raw: RawThreshold) -> Result<Self> {
        let direction = match raw.direction {
            Some(d) => d.parse()?,
            None => Direction::default(),
        };
        ThresholdConfig::new(raw.normal, raw.warning, direction)
    }
}

impl ThresholdConfig {
    pub fn new(normal_boundary: f64, warning_boundary: f64, direction: Direction) -> Result<Self> {
        if !normal_boundary.is_finite() || !warning_boundary.is_finite() {
            return Err(DashboardError::invalid_config(
                "threshold boundaries must be finite",
            ));
        }

        let ordered = match direction {
            Direction::HigherIsBetter => normal_boundary >= warning_boundary,
            Direction::LowerIsBetter => normal_boundary <= warning_boundary,
        };
        if !ordered {
            return Err(DashboardError::invalid_config(format!(
                "normal boundary {} and warning boundary {} are out of order for {:?}",
                normal_boundary, warning_boundary, direction
            )));
        }

        Ok(Self {
            normal_boundary,
            warning_boundary,
            direction,
        })
    }

    pub fn higher_is_better(normal_boundary: f64, warning_boundary: f64) -> Result<Self> {
        Self::new(normal_boundary, warning_boundary, Direction::HigherIsBetter)
    }

    pub fn lower_is_better(normal_boundary: f64, warning_boundary: f64) -> Result<Self> {
        Self::new(normal_boundary, warning_boundary, Direction::LowerIsBetter)
    }

    pub fn normal_boundary(&self) -> f64 {
        self.normal_boundary
    }

    pub fn warning_boundary(&self) -> f64 {
        self.warning_boundary
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Classify a value against its thresholds. Boundaries are inclusive on the
/// better side. A NaN value satisfies no comparison and lands in `Critical`.
pub fn classify(value: f64, config: &ThresholdConfig) -> Status {
    let (normal, warning) = match config.direction {
        Direction::HigherIsBetter => (
            value >= config.normal_boundary,
            value >= config.warning_boundary,
        ),
        Direction::LowerIsBetter => (
            value <= config.normal_boundary,
            value <= config.warning_boundary,
        ),
    };

    if normal {
        Status::Normal
    } else if warning {
        Status::Warning
    } else {
        Status::Critical
    }
}
