//! Minimum signal to interference plus noise ratio
//!
//! SINR is only meaningful after attenuation, so both the signal of interest
//! and every interferer pass through all their remaining analogue models
//! first. The ratio is taken per bin against the worst-case interference
//! envelope of the window and the minimum over the signal's populated bins
//! is reported.

use crate::envelope::max_interference;
use crate::error::{InterferenceError, InterferenceResult};
use crate::frame::AirFrame;
use crate::time::SimTime;
use crate::units::linear_to_db;

/// Lowest linear SINR of `frame` over `[start, end]` with noise power `noise` (mW).
///
/// The window must lie within the frame's reception interval. All frames are
/// fully attenuated in place. `interferers` must be sorted by reception
/// start; copies of `frame` among them are ignored.
///
/// Without interference or noise the ratio is `+inf` for any bin with
/// nonzero power. A signal with no populated bins has no SINR and yields
/// [`InterferenceError::EmptyDataRange`].
pub fn min_sinr(
    start: SimTime,
    end: SimTime,
    frame: &mut AirFrame,
    interferers: &mut [AirFrame],
    noise: f64,
) -> InterferenceResult<f64> {
    if start > end {
        return Err(InterferenceError::InvalidWindow { start, end });
    }
    let reception_start = frame.signal().reception_start();
    let reception_end = frame.signal().reception_end();
    if start < reception_start || end > reception_end {
        tracing::warn!(%start, %end, %reception_start, %reception_end, "SINR window outside reception");
        return Err(InterferenceError::WindowOutsideReception {
            start,
            end,
            reception_start,
            reception_end,
        });
    }

    frame.signal_mut().apply_all_analogue_models()?;
    for interferer in interferers.iter_mut() {
        interferer.signal_mut().apply_all_analogue_models()?;
    }

    let signal = frame.signal();
    if signal.is_data_empty() {
        return Err(InterferenceError::EmptyDataRange);
    }

    let interference = max_interference(start, end, frame, interferers)?;
    let sinr = signal / &(interference + noise);

    let min = sinr.data().iter().copied().fold(f64::INFINITY, f64::min);
    tracing::debug!(%start, %end, interferers = interferers.len(), min_sinr = min, "Computed minimum SINR");
    Ok(min)
}

/// [`min_sinr`] in dB.
pub fn min_sinr_db(
    start: SimTime,
    end: SimTime,
    frame: &mut AirFrame,
    interferers: &mut [AirFrame],
    noise: f64,
) -> InterferenceResult<f64> {
    min_sinr(start, end, frame, interferers, noise).map(linear_to_db)
}
