//! Sweep-line interference extrema
//!
//! Interference is piecewise constant between signal changes. The sweep
//! replays the time-sorted changes of a window, keeps a running sum of the
//! active signals and folds its value into the result at every boundary,
//! i.e. after the last of a group of simultaneous changes.
//!
//! ```text
//!  power
//!    3 |         +-----+
//!    2 |         |     +-----+
//!    1 +---------+     |     |
//!    0 |               |     +----
//!      +---------+-----+-----+---> t
//!      start     5     10    15 = end
//!      A:[0,10) p=1    B:[5,15) p=2
//! ```
//!
//! The window is read as `[start, end)`: changes at `end` are applied but the
//! resulting plateau lies outside the window and is not evaluated. A point
//! query (`start == end`) reads the interference right at that instant.

use crate::changes::{sorted_changes, ChangeType, SignalChange};
use crate::error::{InterferenceError, InterferenceResult};
use crate::frame::{AirFrame, FrameId};
use crate::signal::Signal;
use crate::time::SimTime;

/// Running interference that signal changes can be applied to
trait Accumulator {
    fn apply(&mut self, change: &SignalChange<'_>);
}

impl Accumulator for Signal {
    fn apply(&mut self, change: &SignalChange<'_>) {
        match change.kind {
            ChangeType::Starting => *self += change.signal,
            ChangeType::Ending => *self -= change.signal,
        }
    }
}

/// Interference at a single frequency bin
struct BinPower {
    index: usize,
    total: f64,
}

impl Accumulator for BinPower {
    fn apply(&mut self, change: &SignalChange<'_>) {
        match change.kind {
            ChangeType::Starting => self.total += change.signal.at(self.index),
            ChangeType::Ending => self.total -= change.signal.at(self.index),
        }
    }
}

fn sweep<A, R, F>(
    start: SimTime,
    end: SimTime,
    changes: &[SignalChange<'_>],
    acc: &mut A,
    read: R,
    fold: F,
) -> f64
where
    A: Accumulator,
    R: Fn(&A) -> f64,
    F: Fn(f64, f64) -> f64,
{
    let mut iter = changes.iter().peekable();

    // Replay everything up to the window start
    while let Some(change) = iter.next_if(|c| c.time <= start) {
        acc.apply(change);
    }
    let mut extremum = read(acc);

    while let Some(change) = iter.next() {
        acc.apply(change);
        let boundary = iter.peek().map_or(true, |next| next.time != change.time);
        if boundary && change.time < end {
            extremum = fold(extremum, read(acc));
        }
    }

    extremum
}

fn check_window(start: SimTime, end: SimTime) -> InterferenceResult<()> {
    if start > end {
        return Err(InterferenceError::InvalidWindow { start, end });
    }
    Ok(())
}

/// Error unless every changing signal shares one spectrum.
pub(crate) fn check_spectra(changes: &[SignalChange<'_>]) -> InterferenceResult<()> {
    let Some(first) = changes.first() else {
        return Ok(());
    };
    let spectrum = first.signal.spectrum();
    if changes.iter().any(|c| c.signal.spectrum() != spectrum) {
        tracing::warn!("Signals with different spectra in one interference computation");
        return Err(InterferenceError::SpectrumMismatch);
    }
    Ok(())
}

fn vector_extremum<R, F>(
    start: SimTime,
    end: SimTime,
    frames: &[AirFrame],
    read: R,
    fold: F,
) -> InterferenceResult<f64>
where
    R: Fn(&Signal) -> f64,
    F: Fn(f64, f64) -> f64,
{
    check_window(start, end)?;
    if frames.is_empty() {
        return Ok(0.0);
    }

    let changes = sorted_changes(start, end, frames, None);
    let Some(first) = changes.first() else {
        return Ok(0.0);
    };
    check_spectra(&changes)?;

    let mut interference = Signal::new(first.signal.spectrum().clone());
    Ok(sweep(start, end, &changes, &mut interference, read, fold))
}

/// Highest interference power of any bin at any instant of `[start, end]`.
pub fn global_max(start: SimTime, end: SimTime, frames: &[AirFrame]) -> InterferenceResult<f64> {
    let max = vector_extremum(
        start,
        end,
        frames,
        |s| s.data_max().unwrap_or(0.0),
        f64::max,
    )?;
    tracing::debug!(%start, %end, frames = frames.len(), max, "Global maximum interference");
    Ok(max)
}

/// Lowest interference power over populated bins at any instant of `[start, end]`.
pub fn global_min(start: SimTime, end: SimTime, frames: &[AirFrame]) -> InterferenceResult<f64> {
    let min = vector_extremum(
        start,
        end,
        frames,
        |s| s.data_min().unwrap_or(0.0),
        f64::min,
    )?;
    tracing::debug!(%start, %end, frames = frames.len(), min, "Global minimum interference");
    Ok(min)
}

/// Lowest interference power at bin `freq_index` during `[start, end]`,
/// ignoring the frame `exclude`.
pub fn min_at_freq_index(
    start: SimTime,
    end: SimTime,
    frames: &[AirFrame],
    freq_index: usize,
    exclude: Option<FrameId>,
) -> InterferenceResult<f64> {
    check_window(start, end)?;
    let changes = sorted_changes(start, end, frames, exclude);
    let Some(first) = changes.first() else {
        return Ok(0.0);
    };
    check_spectra(&changes)?;
    // Frames outside the window may use another spectrum
    first.signal.spectrum().check_index(freq_index)?;

    let mut power = BinPower {
        index: freq_index,
        total: 0.0,
    };
    let min = sweep(start, end, &changes, &mut power, |p| p.total, f64::min);
    tracing::trace!(%start, %end, freq_index, changes = changes.len(), min, "Minimum interference at bin");
    Ok(min)
}
