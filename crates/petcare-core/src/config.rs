//! Dashboard and statistics settings.

use serde::{Deserialize, Serialize};

use crate::models::{ValidationError, ValidationResult};

/// Longest daily series a view may ask for.
pub const MAX_SERIES_DAYS: u32 = 366;

/// Reject a series length above [`MAX_SERIES_DAYS`].
pub fn check_series_days(days: u32, field: &'static str) -> ValidationResult {
    if days > MAX_SERIES_DAYS {
        return Err(ValidationError::OutOfRange {
            field,
            value: u64::from(days),
            max: u64::from(MAX_SERIES_DAYS),
        });
    }
    Ok(())
}

/// Window sizes and list lengths for the derived views.
///
/// Missing keys fall back to the defaults, so a host can override a single
/// value with `{"sparkline_days": 30}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rolling window for walk minutes
    pub walk_window_days: u32,
    /// Horizon for the "due soon" count
    pub upcoming_window_days: u32,
    /// Points in the dashboard sparkline
    pub sparkline_days: u32,
    /// Points in the statistics activity chart
    pub statistics_days: u32,
    /// Recent entries and health records shown
    pub recent_limit: usize,
    /// Open reminders shown
    pub upcoming_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            walk_window_days: 7,
            upcoming_window_days: 7,
            sparkline_days: 14,
            statistics_days: 30,
            recent_limit: 5,
            upcoming_limit: 6,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Window lengths must stay within [`MAX_SERIES_DAYS`].
    pub fn validate(&self) -> ValidationResult {
        check_series_days(self.walk_window_days, "walk_window_days")?;
        check_series_days(self.upcoming_window_days, "upcoming_window_days")?;
        check_series_days(self.sparkline_days, "sparkline_days")?;
        check_series_days(self.statistics_days, "statistics_days")
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_json(r#"{"sparkline_days": 30}"#).unwrap();
        assert_eq!(config.sparkline_days, 30);
        assert_eq!(config.walk_window_days, 7);
        assert_eq!(config.upcoming_limit, 6);
    }

    #[test]
    fn test_round_trip() {
        let config = DashboardConfig {
            recent_limit: 10,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(DashboardConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_wrong_types() {
        assert!(DashboardConfig::from_json(r#"{"recent_limit": "five"}"#).is_err());
    }

    #[test]
    fn test_validate_caps_windows() {
        assert!(DashboardConfig::default().validate().is_ok());

        let config = DashboardConfig::from_json(r#"{"statistics_days": 4000000000}"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::OutOfRange {
                field: "statistics_days",
                value: 4_000_000_000,
                max: 366,
            })
        );
    }
}
