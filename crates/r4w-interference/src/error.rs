//! Error types for interference computations
//!
//! Almost every failure here is a broken caller contract (unsorted input,
//! mixed spectra, inconsistent analogue model stacks). Those are reported as
//! distinct variants so a caller can abort the computation instead of acting
//! on wrong numbers; see [`InterferenceError::is_contract_violation`].

use crate::time::SimTime;

/// Result type for interference operations
pub type InterferenceResult<T> = Result<T, InterferenceError>;

/// Errors that can occur while building signals or computing interference
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InterferenceError {
    #[error("Spectrum must contain at least one frequency")]
    EmptySpectrum,

    #[error("Invalid spectrum: {0}")]
    InvalidSpectrum(String),

    #[error("Signals in one computation must share the same spectrum")]
    SpectrumMismatch,

    #[error("Value count {actual} does not match spectrum size {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Data range [{start}, {end}) exceeds spectrum size {len}")]
    DataRangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Frequency index {index} out of range for spectrum of size {len}")]
    FrequencyIndexOutOfRange { index: usize, len: usize },

    #[error("Reception interval starts at {start} after it ends at {end}")]
    InvalidReceptionInterval { start: SimTime, end: SimTime },

    #[error("Query window starts at {start} after it ends at {end}")]
    InvalidWindow { start: SimTime, end: SimTime },

    #[error("Interferers not sorted by reception start: {start} precedes already processed {previous}")]
    UnsortedInterferers { previous: SimTime, start: SimTime },

    #[error("Analogue model count mismatch: expected {expected}, got {actual}")]
    AnalogueModelCountMismatch { expected: usize, actual: usize },

    #[error("Analogue model index {index} out of range ({count} models)")]
    AnalogueModelIndexOutOfRange { index: usize, count: usize },

    #[error("Analogue model failed: {0}")]
    AnalogueModel(String),

    #[error("Query window [{start}, {end}] outside reception interval [{reception_start}, {reception_end})")]
    WindowOutsideReception {
        start: SimTime,
        end: SimTime,
        reception_start: SimTime,
        reception_end: SimTime,
    },

    #[error("Signal has no populated frequency bins")]
    EmptyDataRange,
}

impl InterferenceError {
    /// True for errors raised by a violated caller precondition.
    ///
    /// These are not transient: retrying with the same input fails the same way.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            InterferenceError::UnsortedInterferers { .. }
                | InterferenceError::SpectrumMismatch
                | InterferenceError::AnalogueModelCountMismatch { .. }
                | InterferenceError::WindowOutsideReception { .. }
        )
    }
}
