//! # Analogue Models
//!
//! An analogue model is one stage of the receiver's attenuation pipeline
//! (path loss, shadowing, obstacles, ...). Every signal seen by a receiver
//! carries the same ordered [`AnalogueModelList`] and applies its stages
//! lazily, one index at a time, through [`Signal::apply_analogue_model`].
//!
//! Stages mutate the signal's power in place and are not reversible.
//!
//! ## Provided models
//!
//! - [`ConstantAttenuation`]: frequency-flat loss in dB
//! - [`SimplePathloss`]: distance and frequency dependent loss with a
//!   configurable exponent
//!
//! ```rust
//! use std::sync::Arc;
//! use r4w_interference::analogue::{
//!     analogue_model_list, AnalogueModel, ConstantAttenuation, SimplePathloss,
//! };
//!
//! let stages: Vec<Arc<dyn AnalogueModel>> = vec![
//!     Arc::new(SimplePathloss::new(250.0, 2.0)),
//!     Arc::new(ConstantAttenuation::new(6.0)),
//! ];
//! let models = analogue_model_list(stages);
//! assert_eq!(models.len(), 2);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::error::InterferenceResult;
use crate::signal::Signal;
use crate::units::db_to_linear;

/// Speed of light in m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Ordered attenuation stages shared by every signal of one receiver
pub type AnalogueModelList = Arc<Vec<Arc<dyn AnalogueModel>>>;

/// Build an [`AnalogueModelList`] from individual stages.
pub fn analogue_model_list(models: Vec<Arc<dyn AnalogueModel>>) -> AnalogueModelList {
    Arc::new(models)
}

/// One attenuation stage.
pub trait AnalogueModel: fmt::Debug + Send + Sync {
    /// Short model name for logs.
    fn name(&self) -> &str;

    /// Attenuate `signal` in place.
    fn filter_signal(&self, signal: &mut Signal) -> InterferenceResult<()>;
}

// =============================================================================
// Constant attenuation
// =============================================================================

/// Frequency-flat attenuation, e.g. cable or antenna losses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantAttenuation {
    attenuation_db: f64,
    factor: f64,
}

impl ConstantAttenuation {
    /// Create a stage removing `attenuation_db` dB from every bin.
    pub fn new(attenuation_db: f64) -> Self {
        Self {
            attenuation_db,
            factor: db_to_linear(-attenuation_db),
        }
    }

    /// Attenuation in dB.
    pub fn attenuation_db(&self) -> f64 {
        self.attenuation_db
    }
}

impl AnalogueModel for ConstantAttenuation {
    fn name(&self) -> &str {
        "ConstantAttenuation"
    }

    fn filter_signal(&self, signal: &mut Signal) -> InterferenceResult<()> {
        *signal *= self.factor;
        Ok(())
    }
}

// =============================================================================
// Simple path loss
// =============================================================================

/// Friis-style path loss `(c / (4 pi f d))^alpha`, evaluated per bin.
///
/// With `alpha = 2` this is free-space path loss. Distances at or below
/// zero leave the signal untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplePathloss {
    distance_m: f64,
    alpha: f64,
}

impl SimplePathloss {
    pub fn new(distance_m: f64, alpha: f64) -> Self {
        Self { distance_m, alpha }
    }

    /// Linear gain (< 1) at `frequency_hz`.
    pub fn gain(&self, frequency_hz: f64) -> f64 {
        if self.distance_m <= 0.0 || frequency_hz <= 0.0 {
            return 1.0;
        }
        let wavelength = SPEED_OF_LIGHT / frequency_hz;
        (wavelength / (4.0 * PI * self.distance_m)).powf(self.alpha)
    }
}

impl AnalogueModel for SimplePathloss {
    fn name(&self) -> &str {
        "SimplePathloss"
    }

    fn filter_signal(&self, signal: &mut Signal) -> InterferenceResult<()> {
        signal.map_data(|freq, value| value * self.gain(freq));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::Spectrum;
    use crate::time::SimTime;
    use crate::units::linear_to_db;

    #[test]
    fn test_constant_attenuation() {
        let spectrum = Spectrum::uniform(1e9, 1e6, 3).unwrap();
        let mut signal =
            Signal::from_values(spectrum, vec![1.0, 2.0, 4.0], SimTime::ZERO, SimTime::from_micros(1))
                .unwrap();
        ConstantAttenuation::new(20.0).filter_signal(&mut signal).unwrap();
        assert!((signal.at(0) - 0.01).abs() < 1e-12);
        assert!((signal.at(2) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_free_space_loss_matches_fspl() {
        // 1 km at 1 GHz: FSPL = 20 log10(4 pi d f / c) ~ 92.45 dB
        let model = SimplePathloss::new(1000.0, 2.0);
        let loss_db = -linear_to_db(model.gain(1e9));
        assert!((loss_db - 92.45).abs() < 0.01, "loss = {}", loss_db);
    }

    #[test]
    fn test_pathloss_is_frequency_dependent() {
        let spectrum = Spectrum::new(vec![1e9, 2e9]).unwrap();
        let mut signal =
            Signal::from_values(spectrum, vec![1.0, 1.0], SimTime::ZERO, SimTime::from_micros(1))
                .unwrap();
        SimplePathloss::new(100.0, 2.0).filter_signal(&mut signal).unwrap();
        // Doubling frequency costs 6 dB with alpha = 2
        let diff_db = linear_to_db(signal.at(0) / signal.at(1));
        assert!((diff_db - 6.0206).abs() < 1e-3);
    }

    #[test]
    fn test_pathloss_only_touches_data_range() {
        let spectrum = Spectrum::uniform(1e9, 1e6, 3).unwrap();
        let mut signal =
            Signal::from_values(spectrum, vec![1.0; 3], SimTime::ZERO, SimTime::from_micros(1))
                .unwrap()
                .with_data_range(1, 2)
                .unwrap();
        SimplePathloss::new(10.0, 2.0).filter_signal(&mut signal).unwrap();
        assert_eq!(signal.at(0), 1.0);
        assert!(signal.at(1) < 1.0);
        assert_eq!(signal.at(2), 1.0);
    }

    #[test]
    fn test_zero_distance_is_lossless() {
        assert_eq!(SimplePathloss::new(0.0, 2.0).gain(1e9), 1.0);
    }
}
