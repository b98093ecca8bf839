//! Clear channel assessment against a power threshold
//!
//! Deciding "is the channel below X" rarely needs fully attenuated
//! interferers: the raw sum is often already low enough, or one cheap stage
//! settles it. Analogue models are therefore applied one stage index at a
//! time across all active interferers, and the test returns as soon as the
//! summed power drops below the threshold.
//!
//! Applied stages stay applied. A second call on the same frames starts from
//! their already attenuated power and may answer differently than the first.

use crate::error::{InterferenceError, InterferenceResult};
use crate::frame::{AirFrame, FrameId};
use crate::signal::Signal;
use crate::time::SimTime;

fn power_sum_at(signals: &[&mut Signal], freq_index: usize) -> f64 {
    signals.iter().map(|s| s.at(freq_index)).sum()
}

/// Whether the interference at `now` and bin `freq_index`, ignoring
/// `exclude`, is below `threshold` (linear power, mW).
///
/// Active interferers are attenuated in place, one analogue model stage at
/// a time, only as far as needed to prove the channel clear. Every active
/// interferer must carry the same number of stages.
pub fn is_channel_power_below_threshold(
    now: SimTime,
    frames: &mut [AirFrame],
    freq_index: usize,
    threshold: f64,
    exclude: Option<FrameId>,
) -> InterferenceResult<bool> {
    if frames.is_empty() {
        return Ok(true);
    }

    let mut interferers: Vec<&mut Signal> = frames
        .iter_mut()
        .filter(|frame| Some(frame.id()) != exclude && frame.signal().is_active_at(now))
        .map(AirFrame::signal_mut)
        .collect();

    let Some(first) = interferers.first() else {
        tracing::trace!(%now, "No active interferers");
        return Ok(true);
    };
    let spectrum = first.spectrum().clone();
    let model_count = first.num_analogue_models();
    spectrum.check_index(freq_index)?;

    for signal in &interferers {
        if *signal.spectrum() != spectrum {
            return Err(InterferenceError::SpectrumMismatch);
        }
        if signal.num_analogue_models() != model_count {
            tracing::warn!(
                expected = model_count,
                actual = signal.num_analogue_models(),
                "Interferers carry different analogue model stacks"
            );
            return Err(InterferenceError::AnalogueModelCountMismatch {
                expected: model_count,
                actual: signal.num_analogue_models(),
            });
        }
    }

    if power_sum_at(&interferers, freq_index) < threshold {
        tracing::trace!(%now, interferers = interferers.len(), "Channel clear before attenuation");
        return Ok(true);
    }

    for stage in 0..model_count {
        for signal in interferers.iter_mut() {
            signal.apply_analogue_model(stage)?;
        }
        if power_sum_at(&interferers, freq_index) < threshold {
            tracing::trace!(%now, stage, "Channel clear after analogue model");
            return Ok(true);
        }
    }

    let power = power_sum_at(&interferers, freq_index);
    debug_assert!(power >= threshold || power.is_nan() || threshold.is_nan());
    tracing::debug!(%now, freq_index, power, threshold, "Channel busy");
    Ok(false)
}
