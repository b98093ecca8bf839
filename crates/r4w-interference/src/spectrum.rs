//! Frequency axis shared by all signals seen at one receiver
//!
//! A [`Spectrum`] is an ordered list of bin centre frequencies. Signals are
//! only combinable when they share a spectrum, so cloning is cheap (the
//! frequencies live behind an `Arc`) and equality first checks for the same
//! allocation before falling back to comparing values.
//!
//! ```rust
//! use r4w_interference::spectrum::Spectrum;
//!
//! // Ten 10 MHz channels starting at 5.86 GHz
//! let spectrum = Spectrum::uniform(5.86e9, 10e6, 10).unwrap();
//! assert_eq!(spectrum.len(), 10);
//! assert_eq!(spectrum.nearest_index(5.889e9), 3);
//! ```

use std::sync::Arc;

use crate::error::{InterferenceError, InterferenceResult};

/// Ordered set of frequency bins (Hz)
#[derive(Debug, Clone)]
pub struct Spectrum {
    frequencies: Arc<[f64]>,
}

impl Spectrum {
    /// Create a spectrum from strictly ascending, finite bin frequencies.
    pub fn new(frequencies: Vec<f64>) -> InterferenceResult<Self> {
        if frequencies.is_empty() {
            return Err(InterferenceError::EmptySpectrum);
        }
        if let Some(bad) = frequencies.iter().find(|f| !f.is_finite()) {
            return Err(InterferenceError::InvalidSpectrum(format!(
                "non-finite frequency {}",
                bad
            )));
        }
        if let Some(pair) = frequencies.windows(2).find(|w| w[0] >= w[1]) {
            return Err(InterferenceError::InvalidSpectrum(format!(
                "frequencies not strictly ascending: {} >= {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self {
            frequencies: frequencies.into(),
        })
    }

    /// Create `count` evenly spaced bins starting at `start_hz`.
    pub fn uniform(start_hz: f64, step_hz: f64, count: usize) -> InterferenceResult<Self> {
        Self::new((0..count).map(|i| start_hz + step_hz * i as f64).collect())
    }

    /// Number of frequency bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Always false: construction rejects empty spectra.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Bin centre frequencies.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Frequency of bin `index`, if it exists.
    pub fn frequency(&self, index: usize) -> Option<f64> {
        self.frequencies.get(index).copied()
    }

    /// Index of the bin at exactly `freq_hz`.
    pub fn index_of(&self, freq_hz: f64) -> Option<usize> {
        self.frequencies.iter().position(|&f| f == freq_hz)
    }

    /// Index of the bin closest to `freq_hz`.
    pub fn nearest_index(&self, freq_hz: f64) -> usize {
        // partition_point gives the first bin >= freq_hz
        let upper = self.frequencies.partition_point(|&f| f < freq_hz);
        if upper == 0 {
            return 0;
        }
        if upper == self.len() {
            return self.len() - 1;
        }
        let below = freq_hz - self.frequencies[upper - 1];
        let above = self.frequencies[upper] - freq_hz;
        if below <= above {
            upper - 1
        } else {
            upper
        }
    }

    /// Error unless `index` addresses a bin of this spectrum.
    pub fn check_index(&self, index: usize) -> InterferenceResult<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(InterferenceError::FrequencyIndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

impl PartialEq for Spectrum {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.frequencies, &other.frequencies) || self.frequencies == other.frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_unsorted() {
        assert_eq!(Spectrum::new(vec![]), Err(InterferenceError::EmptySpectrum));
        assert!(matches!(
            Spectrum::new(vec![2.0, 1.0]),
            Err(InterferenceError::InvalidSpectrum(_))
        ));
        assert!(matches!(
            Spectrum::new(vec![1.0, 1.0]),
            Err(InterferenceError::InvalidSpectrum(_))
        ));
        assert!(matches!(
            Spectrum::new(vec![1.0, f64::NAN]),
            Err(InterferenceError::InvalidSpectrum(_))
        ));
    }

    #[test]
    fn test_equality_by_value() {
        let a = Spectrum::uniform(100.0, 10.0, 4).unwrap();
        let b = Spectrum::new(vec![100.0, 110.0, 120.0, 130.0]).unwrap();
        let c = Spectrum::uniform(100.0, 10.0, 5).unwrap();
        assert_eq!(a, a.clone());
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_index_lookup() {
        let s = Spectrum::uniform(100.0, 10.0, 4).unwrap();
        assert_eq!(s.index_of(120.0), Some(2));
        assert_eq!(s.index_of(121.0), None);
        assert_eq!(s.nearest_index(50.0), 0);
        assert_eq!(s.nearest_index(114.0), 1);
        assert_eq!(s.nearest_index(116.0), 2);
        assert_eq!(s.nearest_index(1e6), 3);
        assert_eq!(s.frequency(3), Some(130.0));
        assert_eq!(s.frequency(4), None);
    }

    #[test]
    fn test_check_index() {
        let s = Spectrum::uniform(0.0, 1.0, 2).unwrap();
        assert!(s.check_index(1).is_ok());
        assert_eq!(
            s.check_index(2),
            Err(InterferenceError::FrequencyIndexOutOfRange { index: 2, len: 2 })
        );
    }
}
