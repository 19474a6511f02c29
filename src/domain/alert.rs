// Alert records surfaced alongside the dashboard
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub equipment: String,
    pub issue: String,
    pub severity: AlertSeverity,
    pub duration: String,
    pub action: String,
}

impl Alert {
    pub fn new(
        equipment: String,
        issue: String,
        severity: AlertSeverity,
        duration: String,
        action: String,
    ) -> Self {
        Self {
            equipment,
            issue,
            severity,
            duration,
            action,
        }
    }

    pub fn is_high(&self) -> bool {
        self.severity == AlertSeverity::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_alert() {
        let alert: Alert = toml::from_str(
            r#"
            equipment = "Compressor #7"
            issue = "Temperature exceeding threshold"
            severity = "high"
            duration = "4 hours"
            action = "Inspect cooling system"
            "#,
        )
        .unwrap();
        assert!(alert.is_high());
        assert_eq!(alert.equipment, "Compressor #7");
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let result = toml::from_str::<Alert>(
            r#"
            equipment = "Chiller #3"
            issue = "Low refrigerant pressure"
            severity = "urgent"
            duration = "8 hours"
            action = "Check for leaks"
            "#,
        );
        assert!(result.is_err());
    }
}
