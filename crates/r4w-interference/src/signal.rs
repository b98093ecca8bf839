//! Time-bounded power spectrum of one transmission
//!
//! A [`Signal`] holds one linear power value (mW) per frequency bin of its
//! [`Spectrum`], the half-open reception interval `[start, end)` during which
//! it is on the air, and the receiver's stack of analogue models it still
//! has to pass through.
//!
//! ## Populated range
//!
//! Only the bins in `[data_start, data_end)` carry meaningful power. The
//! arithmetic operators read the right-hand side over its populated range
//! only, and `+=` widens the left-hand side's range to the union, which makes
//! an empty [`Signal::new`] a correct running accumulator.
//!
//! ## Analogue models
//!
//! Attenuation is applied in place and cannot be undone. The signal counts
//! how many models of its list have run, so asking for a stage that was
//! already applied is a no-op rather than a second attenuation.
//!
//! ```text
//!  models:   [ pathloss | shadowing | obstacles ]
//!                 ^applied    ^next
//! ```

use std::ops::{Add, AddAssign, Div, MulAssign, SubAssign};
use std::sync::Arc;

use crate::analogue::AnalogueModelList;
use crate::error::{InterferenceError, InterferenceResult};
use crate::spectrum::Spectrum;
use crate::time::SimTime;

/// Power values over a spectrum, active during `[reception_start, reception_end)`
#[derive(Debug, Clone)]
pub struct Signal {
    spectrum: Spectrum,
    values: Vec<f64>,
    data_start: usize,
    data_end: usize,
    reception_start: SimTime,
    reception_end: SimTime,
    analogue_models: AnalogueModelList,
    analogue_models_applied: usize,
}

impl Signal {
    /// Create an all-zero signal with an empty populated range.
    pub fn new(spectrum: Spectrum) -> Self {
        let len = spectrum.len();
        Self {
            spectrum,
            values: vec![0.0; len],
            data_start: 0,
            data_end: 0,
            reception_start: SimTime::ZERO,
            reception_end: SimTime::ZERO,
            analogue_models: Arc::new(Vec::new()),
            analogue_models_applied: 0,
        }
    }

    /// Create a signal with one value per bin, populated over the whole spectrum.
    pub fn from_values(
        spectrum: Spectrum,
        values: Vec<f64>,
        reception_start: SimTime,
        reception_end: SimTime,
    ) -> InterferenceResult<Self> {
        if values.len() != spectrum.len() {
            return Err(InterferenceError::LengthMismatch {
                expected: spectrum.len(),
                actual: values.len(),
            });
        }
        if reception_start > reception_end {
            return Err(InterferenceError::InvalidReceptionInterval {
                start: reception_start,
                end: reception_end,
            });
        }

        let data_end = values.len();
        Ok(Self {
            spectrum,
            values,
            data_start: 0,
            data_end,
            reception_start,
            reception_end,
            analogue_models: Arc::new(Vec::new()),
            analogue_models_applied: 0,
        })
    }

    /// Restrict the populated range to `[start, end)`.
    pub fn with_data_range(mut self, start: usize, end: usize) -> InterferenceResult<Self> {
        if start > end || end > self.values.len() {
            return Err(InterferenceError::DataRangeOutOfBounds {
                start,
                end,
                len: self.values.len(),
            });
        }
        self.data_start = start;
        self.data_end = end;
        Ok(self)
    }

    /// Attach the receiver's analogue model stack. No model is applied yet.
    pub fn with_analogue_models(mut self, models: AnalogueModelList) -> Self {
        self.analogue_models = models;
        self.analogue_models_applied = 0;
        self
    }

    pub fn spectrum(&self) -> &Spectrum {
        &self.spectrum
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Power at bin `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the spectrum, like slice indexing.
    #[inline]
    pub fn at(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Mutable power at bin `index`. Panics like [`Signal::at`].
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }

    pub fn data_start(&self) -> usize {
        self.data_start
    }

    pub fn data_end(&self) -> usize {
        self.data_end
    }

    /// Whether no bin is populated.
    pub fn is_data_empty(&self) -> bool {
        self.data_start >= self.data_end
    }

    pub fn reception_start(&self) -> SimTime {
        self.reception_start
    }

    pub fn reception_end(&self) -> SimTime {
        self.reception_end
    }

    pub fn duration(&self) -> SimTime {
        self.reception_end - self.reception_start
    }

    /// Whether the signal is on the air at `t` (half-open interval).
    pub fn is_active_at(&self, t: SimTime) -> bool {
        self.reception_start <= t && t < self.reception_end
    }

    /// Whether the signal is on the air at some instant of `(start, end)`.
    pub fn overlaps(&self, start: SimTime, end: SimTime) -> bool {
        self.reception_start < end && self.reception_end > start
    }

    /// Largest value over the populated range.
    pub fn data_max(&self) -> Option<f64> {
        self.data().iter().copied().reduce(f64::max)
    }

    /// Smallest value over the populated range.
    pub fn data_min(&self) -> Option<f64> {
        self.data().iter().copied().reduce(f64::min)
    }

    /// Values of the populated range.
    pub fn data(&self) -> &[f64] {
        if self.is_data_empty() {
            return &[];
        }
        &self.values[self.data_start..self.data_end]
    }

    /// Rewrite each populated bin as `f(frequency_hz, value)`.
    pub fn map_data<F>(&mut self, mut f: F)
    where
        F: FnMut(f64, f64) -> f64,
    {
        if self.is_data_empty() {
            return;
        }
        let range = self.data_start..self.data_end;
        let frequencies = &self.spectrum.frequencies()[range.clone()];
        for (value, &freq) in self.values[range].iter_mut().zip(frequencies) {
            *value = f(freq, *value);
        }
    }

    // =========================================================================
    // Analogue models
    // =========================================================================

    pub fn analogue_models(&self) -> &AnalogueModelList {
        &self.analogue_models
    }

    pub fn num_analogue_models(&self) -> usize {
        self.analogue_models.len()
    }

    pub fn num_analogue_models_applied(&self) -> usize {
        self.analogue_models_applied
    }

    /// Apply every pending analogue model up to and including `index`.
    ///
    /// Models that already ran are skipped, so repeated calls never attenuate
    /// twice. A failing model leaves the applied count at that model.
    pub fn apply_analogue_model(&mut self, index: usize) -> InterferenceResult<()> {
        let count = self.analogue_models.len();
        if index >= count {
            return Err(InterferenceError::AnalogueModelIndexOutOfRange { index, count });
        }

        while self.analogue_models_applied <= index {
            let model = Arc::clone(&self.analogue_models[self.analogue_models_applied]);
            tracing::trace!(
                model = model.name(),
                index = self.analogue_models_applied,
                "Applying analogue model"
            );
            model.filter_signal(self)?;
            self.analogue_models_applied += 1;
        }
        Ok(())
    }

    /// Apply every remaining analogue model.
    pub fn apply_all_analogue_models(&mut self) -> InterferenceResult<()> {
        match self.analogue_models.len() {
            0 => Ok(()),
            count => self.apply_analogue_model(count - 1),
        }
    }
}

impl AddAssign<&Signal> for Signal {
    /// Add `other` over its populated range and widen ours to the union.
    fn add_assign(&mut self, other: &Signal) {
        debug_assert!(self.spectrum == other.spectrum, "spectrum mismatch");
        if other.is_data_empty() {
            return;
        }
        let range = other.data_start..other.data_end;
        for (lhs, rhs) in self.values[range.clone()].iter_mut().zip(&other.values[range]) {
            *lhs += rhs;
        }

        if self.is_data_empty() {
            self.data_start = other.data_start;
            self.data_end = other.data_end;
        } else {
            self.data_start = self.data_start.min(other.data_start);
            self.data_end = self.data_end.max(other.data_end);
        }
    }
}

impl SubAssign<&Signal> for Signal {
    /// Subtract `other` over its populated range. The populated range is kept.
    fn sub_assign(&mut self, other: &Signal) {
        debug_assert!(self.spectrum == other.spectrum, "spectrum mismatch");
        if other.is_data_empty() {
            return;
        }
        let range = other.data_start..other.data_end;
        for (lhs, rhs) in self.values[range.clone()].iter_mut().zip(&other.values[range]) {
            *lhs -= rhs;
        }
    }
}

impl MulAssign<f64> for Signal {
    /// Scale the populated range.
    fn mul_assign(&mut self, factor: f64) {
        self.map_data(|_, value| value * factor);
    }
}

impl Add<f64> for Signal {
    type Output = Signal;

    /// Add a constant power (e.g. a noise floor) to every bin.
    fn add(mut self, rhs: f64) -> Self::Output {
        for value in self.values.iter_mut() {
            *value += rhs;
        }
        self
    }
}

impl Div<&Signal> for &Signal {
    type Output = Signal;

    /// Element-wise ratio. The result keeps the numerator's populated range
    /// and reception interval, and carries no analogue models.
    fn div(self, rhs: &Signal) -> Self::Output {
        debug_assert!(self.spectrum == rhs.spectrum, "spectrum mismatch");
        let values = self
            .values
            .iter()
            .zip(&rhs.values)
            .map(|(num, den)| num / den)
            .collect();

        Signal {
            spectrum: self.spectrum.clone(),
            values,
            data_start: self.data_start,
            data_end: self.data_end,
            reception_start: self.reception_start,
            reception_end: self.reception_end,
            analogue_models: Arc::new(Vec::new()),
            analogue_models_applied: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analogue::{analogue_model_list, ConstantAttenuation};

    fn spectrum() -> Spectrum {
        Spectrum::uniform(100.0, 10.0, 5).unwrap()
    }

    fn signal(values: Vec<f64>, start: i64, end: i64) -> Signal {
        Signal::from_values(
            spectrum(),
            values,
            SimTime::from_micros(start),
            SimTime::from_micros(end),
        )
        .unwrap()
    }

    #[test]
    fn test_construction_checks() {
        assert_eq!(
            Signal::from_values(spectrum(), vec![1.0; 3], SimTime::ZERO, SimTime::ZERO).err(),
            Some(InterferenceError::LengthMismatch { expected: 5, actual: 3 })
        );
        assert!(matches!(
            Signal::from_values(
                spectrum(),
                vec![1.0; 5],
                SimTime::from_micros(2),
                SimTime::from_micros(1)
            ),
            Err(InterferenceError::InvalidReceptionInterval { .. })
        ));
        assert!(matches!(
            signal(vec![1.0; 5], 0, 1).with_data_range(3, 6),
            Err(InterferenceError::DataRangeOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_accumulator_widens_data_range() {
        let a = signal(vec![0.0, 1.0, 2.0, 0.0, 0.0], 0, 10)
            .with_data_range(1, 3)
            .unwrap();
        let b = signal(vec![0.0, 0.0, 1.0, 4.0, 0.0], 0, 10)
            .with_data_range(2, 4)
            .unwrap();

        let mut acc = Signal::new(spectrum());
        assert!(acc.is_data_empty());
        assert_eq!(acc.data_min(), None);

        acc += &a;
        assert_eq!((acc.data_start(), acc.data_end()), (1, 3));
        acc += &b;
        assert_eq!((acc.data_start(), acc.data_end()), (1, 4));
        assert_eq!(acc.data(), &[1.0, 3.0, 4.0]);
        assert_eq!(acc.data_min(), Some(1.0));
        assert_eq!(acc.data_max(), Some(4.0));

        acc -= &a;
        assert_eq!(acc.data(), &[0.0, 1.0, 4.0]);
        assert_eq!((acc.data_start(), acc.data_end()), (1, 4));
    }

    #[test]
    fn test_values_outside_data_range_ignored() {
        let a = signal(vec![9.0, 1.0, 1.0, 9.0, 9.0], 0, 10)
            .with_data_range(1, 3)
            .unwrap();
        let mut acc = Signal::new(spectrum());
        acc += &a;
        assert_eq!(acc.values(), &[0.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(a.values()[0], 9.0);
        assert_eq!(a.data_max(), Some(1.0));
    }

    #[test]
    fn test_division_and_scalar_add() {
        let s = signal(vec![2.0, 4.0, 6.0, 8.0, 10.0], 0, 10);
        let i = signal(vec![1.0, 1.0, 2.0, 3.0, 0.0], 0, 10) + 1.0;
        let ratio = &s / &i;
        assert_eq!(ratio.values(), &[1.0, 2.0, 2.0, 2.0, 10.0]);
        assert_eq!(ratio.reception_end(), SimTime::from_micros(10));
    }

    #[test]
    fn test_activity() {
        let s = signal(vec![1.0; 5], 5, 10);
        assert!(!s.is_active_at(SimTime::from_micros(4)));
        assert!(s.is_active_at(SimTime::from_micros(5)));
        assert!(!s.is_active_at(SimTime::from_micros(10)));
        assert!(s.overlaps(SimTime::from_micros(9), SimTime::from_micros(20)));
        assert!(!s.overlaps(SimTime::from_micros(10), SimTime::from_micros(20)));
        assert!(!s.overlaps(SimTime::ZERO, SimTime::from_micros(5)));
        assert_eq!(s.duration(), SimTime::from_micros(5));
    }

    #[test]
    fn test_analogue_models_apply_once() {
        let models = analogue_model_list(vec![
            Arc::new(ConstantAttenuation::new(10.0)),
            Arc::new(ConstantAttenuation::new(3.0103)),
        ]);
        let mut s = signal(vec![10.0; 5], 0, 10).with_analogue_models(models);
        assert_eq!(s.num_analogue_models(), 2);

        s.apply_analogue_model(0).unwrap();
        assert!((s.at(0) - 1.0).abs() < 1e-9);
        s.apply_analogue_model(0).unwrap();
        assert!((s.at(0) - 1.0).abs() < 1e-9);
        assert_eq!(s.num_analogue_models_applied(), 1);

        s.apply_all_analogue_models().unwrap();
        assert!((s.at(0) - 0.5).abs() < 1e-4);
        s.apply_all_analogue_models().unwrap();
        assert!((s.at(0) - 0.5).abs() < 1e-4);
        assert_eq!(s.num_analogue_models_applied(), 2);

        assert_eq!(
            s.apply_analogue_model(2),
            Err(InterferenceError::AnalogueModelIndexOutOfRange { index: 2, count: 2 })
        );
    }

    #[test]
    fn test_apply_index_runs_earlier_stages() {
        let models = analogue_model_list(vec![
            Arc::new(ConstantAttenuation::new(10.0)),
            Arc::new(ConstantAttenuation::new(10.0)),
        ]);
        let mut s = signal(vec![100.0; 5], 0, 10).with_analogue_models(models);
        s.apply_analogue_model(1).unwrap();
        assert_eq!(s.num_analogue_models_applied(), 2);
        assert!((s.at(2) - 1.0).abs() < 1e-9);
    }
}
