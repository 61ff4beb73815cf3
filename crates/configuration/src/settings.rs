use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty (or absent) `config.toml` yields a
/// fully usable configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub report: ReportSettings,
    pub elasticity: ElasticitySettings,
    pub logging: LoggingSettings,
}

/// Where the dataset comes from and how much of it to preview.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSettings {
    /// CSV file used when no `--file` is given on the command line.
    pub path: PathBuf,
    /// Number of leading rows shown in the data preview.
    pub preview_rows: usize,
}

/// Parameters for the dashboard report.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Number of equal-width bins in the lead time histogram.
    pub histogram_bins: usize,
    pub format: OutputFormat,
}

/// Parameters for the price elasticity calculator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ElasticitySettings {
    /// Number of evenly spaced prices at which the demand curve is evaluated.
    pub curve_samples: usize,
    /// How far |elasticity| may be from 1.0 and still count as unit elastic.
    /// 0.0 means an exact comparison.
    pub unit_tolerance: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set (e.g. "warn", "analytics=debug").
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

// --- Default Implementations ---

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/local_hotel_ota_sample.csv"),
            preview_rows: 5,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            histogram_bins: 20,
            format: OutputFormat::Table,
        }
    }
}

impl Default for ElasticitySettings {
    fn default() -> Self {
        Self {
            curve_samples: 100,
            unit_tolerance: 0.0,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            directory: None,
            file_prefix: "hotel-insights.log".to_string(),
        }
    }
}

impl Config {
    /// Rejects values that would make a computation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "report.histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.elasticity.curve_samples == 0 {
            return Err(ConfigError::ValidationError(
                "elasticity.curve_samples must be at least 1".to_string(),
            ));
        }
        let tolerance = self.elasticity.unit_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "elasticity.unit_tolerance must be a non-negative number, got {tolerance}"
            )));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.report.histogram_bins, 20);
        assert_eq!(config.elasticity.curve_samples, 100);
        assert_eq!(config.data.preview_rows, 5);
        assert_eq!(config.report.format, OutputFormat::Table);
    }

    #[test]
    fn zero_bins_are_rejected() {
        let mut config = Config::default();
        config.report.histogram_bins = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let mut config = Config::default();
        config.elasticity.unit_tolerance = -0.1;
        assert!(config.validate().is_err());
        config.elasticity.unit_tolerance = f64::NAN;
        assert!(config.validate().is_err());
    }
}
