//! # Receiver Configuration
//!
//! YAML configuration for the receiver-side power parameters, plus
//! [`ChannelSensor`], which binds those parameters to the threshold and SINR
//! computations.
//!
//! ## Example Configuration
//!
//! ```yaml
//! noise_floor_dbm: -98.0
//! cca_threshold_dbm: -65.0
//! log:
//!   level: debug
//!   format: compact
//! ```
//!
//! ```rust
//! use r4w_interference::config::{ChannelSensor, InterferenceConfig};
//!
//! let config = InterferenceConfig::from_yaml("cca_threshold_dbm: -70.0").unwrap();
//! let sensor = ChannelSensor::new(config).unwrap();
//! assert!((sensor.threshold_mw() - 1e-7).abs() < 1e-12);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::InterferenceResult;
use crate::frame::{AirFrame, FrameId};
use crate::observe::LogConfig;
use crate::sinr::min_sinr;
use crate::threshold::is_channel_power_below_threshold;
use crate::time::SimTime;
use crate::units::{dbm_to_mw, linear_to_db};

/// Error type for configuration operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadError(String),

    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("invalid config: {0}")]
    ValidationError(String),
}

/// Receiver power parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterferenceConfig {
    /// Thermal noise plus receiver noise figure, in dBm
    pub noise_floor_dbm: f64,
    /// Clear channel assessment threshold, in dBm
    pub cca_threshold_dbm: f64,
    /// Logging settings
    pub log: LogConfig,
}

impl Default for InterferenceConfig {
    fn default() -> Self {
        Self {
            noise_floor_dbm: -98.0,
            cca_threshold_dbm: -65.0,
            log: LogConfig::default(),
        }
    }
}

impl InterferenceConfig {
    /// Load and validate configuration from a YAML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.noise_floor_dbm.is_finite() {
            return Err(ConfigError::ValidationError(
                "noise_floor_dbm must be finite".to_string(),
            ));
        }
        if !self.cca_threshold_dbm.is_finite() {
            return Err(ConfigError::ValidationError(
                "cca_threshold_dbm must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn noise_floor_mw(&self) -> f64 {
        dbm_to_mw(self.noise_floor_dbm)
    }

    pub fn cca_threshold_mw(&self) -> f64 {
        dbm_to_mw(self.cca_threshold_dbm)
    }
}

/// Channel sensing with a receiver's configured noise floor and threshold
#[derive(Debug, Clone)]
pub struct ChannelSensor {
    config: InterferenceConfig,
    noise_mw: f64,
    threshold_mw: f64,
}

impl ChannelSensor {
    /// Create a sensor from a validated configuration.
    pub fn new(config: InterferenceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            noise_mw: config.noise_floor_mw(),
            threshold_mw: config.cca_threshold_mw(),
            config,
        })
    }

    pub fn config(&self) -> &InterferenceConfig {
        &self.config
    }

    /// Noise floor in mW.
    pub fn noise_mw(&self) -> f64 {
        self.noise_mw
    }

    /// CCA threshold in mW.
    pub fn threshold_mw(&self) -> f64 {
        self.threshold_mw
    }

    /// Whether interference at `now` on bin `freq_index` is below the CCA
    /// threshold. Attenuates the active frames as far as needed.
    pub fn is_channel_clear(
        &self,
        now: SimTime,
        frames: &mut [AirFrame],
        freq_index: usize,
        exclude: Option<FrameId>,
    ) -> InterferenceResult<bool> {
        is_channel_power_below_threshold(now, frames, freq_index, self.threshold_mw, exclude)
    }

    /// Minimum linear SINR of `frame` against the configured noise floor.
    pub fn min_sinr(
        &self,
        start: SimTime,
        end: SimTime,
        frame: &mut AirFrame,
        interferers: &mut [AirFrame],
    ) -> InterferenceResult<f64> {
        min_sinr(start, end, frame, interferers, self.noise_mw)
    }

    /// Minimum SINR in dB against the configured noise floor.
    pub fn min_sinr_db(
        &self,
        start: SimTime,
        end: SimTime,
        frame: &mut AirFrame,
        interferers: &mut [AirFrame],
    ) -> InterferenceResult<f64> {
        self.min_sinr(start, end, frame, interferers).map(linear_to_db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::{LogFormat, LogLevel};
    use crate::signal::Signal;
    use crate::spectrum::Spectrum;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = InterferenceConfig::from_yaml("noise_floor_dbm: -100.0").unwrap();
        assert_eq!(config.noise_floor_dbm, -100.0);
        assert_eq!(config.cca_threshold_dbm, -65.0);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = InterferenceConfig::default();
        config.log.format = LogFormat::Json;
        let yaml = config.to_yaml().unwrap();
        let parsed = InterferenceConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            InterferenceConfig::from_yaml("noise_floor_dbm: [1, 2]"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            InterferenceConfig::from_yaml("cca_threshold_dbm: .nan"),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("r4w-interference-missing-config.yaml");
        assert!(matches!(
            InterferenceConfig::load_from(&path),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "r4w-interference-config-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "cca_threshold_dbm: -80.0\nlog:\n  level: debug\n").unwrap();
        let config = InterferenceConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.cca_threshold_dbm, -80.0);
        assert_eq!(config.log.level, LogLevel::Debug);
    }

    #[test]
    fn test_sensor_uses_configured_levels() {
        let config = InterferenceConfig {
            noise_floor_dbm: -90.0,
            cca_threshold_dbm: -60.0,
            ..Default::default()
        };
        let sensor = ChannelSensor::new(config).unwrap();
        assert!((sensor.noise_mw() - 1e-9).abs() < 1e-18);

        let spectrum = Spectrum::uniform(5.9e9, 10e6, 1).unwrap();
        let t = |us| SimTime::from_micros(us);
        // -50 dBm interferer is above the -60 dBm threshold
        let mut frames = vec![AirFrame::new(
            Signal::from_values(spectrum.clone(), vec![1e-5], t(0), t(10)).unwrap(),
        )];
        assert!(!sensor.is_channel_clear(t(5), &mut frames, 0, None).unwrap());
        assert!(sensor.is_channel_clear(t(10), &mut frames, 0, None).unwrap());

        // -70 dBm signal over a -90 dBm noise floor: 20 dB
        let mut reference = AirFrame::new(
            Signal::from_values(spectrum, vec![1e-7], t(0), t(10)).unwrap(),
        );
        let sinr_db = sensor.min_sinr_db(t(0), t(10), &mut reference, &mut []).unwrap();
        assert!((sinr_db - 20.0).abs() < 1e-9);
    }
}
