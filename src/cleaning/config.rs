//! Cleaner configuration

use serde::{Deserialize, Serialize};

use crate::{Result, TimingError};

/// Settings for [`TimingCleaner`](super::TimingCleaner).
///
/// Every field has a default, so a YAML document only needs the keys it
/// changes:
///
/// ```rust
/// use racepace::CleanerConfig;
///
/// let config = CleanerConfig::from_yaml_str("include_sectors: true\nmax_iterations: 8\n")?;
/// assert!(config.include_sectors);
/// assert_eq!(config.max_iterations, 8);
/// assert_eq!(config.sigma, 3.0);
/// # Ok::<(), racepace::TimingError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default, deny_unknown_fields)]
pub struct CleanerConfig {
    /// Upper limit on trim passes; 0 disables trimming
    pub max_iterations: usize,
    /// Also trim on the three sector columns
    pub include_sectors: bool,
    /// Standard deviations above the mean at which a time is an outlier
    pub sigma: f64,
    /// Full-tank fuel penalty in seconds
    pub fuel_effect_seconds: f64,
    /// Stop once a pass removes nothing
    pub stop_on_fixed_point: bool,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            include_sectors: false,
            sigma: 3.0,
            fuel_effect_seconds: 3.3,
            stop_on_fixed_point: true,
        }
    }
}

impl CleanerConfig {
    /// Lap-time-only cleaning with a custom pass limit.
    pub fn with_iterations(max_iterations: usize) -> Self {
        Self { max_iterations, ..Self::default() }
    }

    /// Lap and sector cleaning with default settings.
    pub fn with_sectors() -> Self {
        Self { include_sectors: true, ..Self::default() }
    }

    /// Parse and validate a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            TimingError::parse("Cleaner configuration", format!("YAML parsing failed: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(TimingError::invalid_config(format!(
                "sigma must be positive and finite, got {}",
                self.sigma
            )));
        }

        if !(self.fuel_effect_seconds.is_finite() && self.fuel_effect_seconds >= 0.0) {
            return Err(TimingError::invalid_config(format!(
                "fuel_effect_seconds must be non-negative and finite, got {}",
                self.fuel_effect_seconds
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_pipeline() {
        let config = CleanerConfig::default();
        assert_eq!(config.max_iterations, 5);
        assert!(!config.include_sectors);
        assert_eq!(config.sigma, 3.0);
        assert_eq!(config.fuel_effect_seconds, 3.3);
        assert!(config.stop_on_fixed_point);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = CleanerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, CleanerConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = CleanerConfig::from_yaml_str("sigmaa: 2.0").unwrap_err();
        assert!(matches!(err, TimingError::Parse { .. }));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = CleanerConfig::from_yaml_str("sigma: 0").unwrap_err();
        assert!(matches!(err, TimingError::InvalidConfig { .. }));

        let err = CleanerConfig::from_yaml_str("fuel_effect_seconds: -1.5").unwrap_err();
        assert!(matches!(err, TimingError::InvalidConfig { .. }));

        let config = CleanerConfig { sigma: f64::NAN, ..CleanerConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn helpers_adjust_single_fields() {
        assert_eq!(CleanerConfig::with_iterations(0).max_iterations, 0);
        assert!(CleanerConfig::with_sectors().include_sectors);
    }
}
