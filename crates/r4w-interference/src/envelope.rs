//! Interference envelope of a signal of interest
//!
//! Computes, per frequency bin, the highest total interference any instant of
//! `[start, end]` sees, ignoring every copy of the reference transmission.
//!
//! Interferers must arrive sorted by reception start. Interference only grows
//! when a signal starts, so the envelope is read right after each start. A
//! min-heap of the active interferers keyed by reception end drops expired
//! contributions before each new one is added, and only the bins the new
//! signal populates are compared against the running maximum.
//!
//! ```text
//!   interferers (sorted by start)     heap (min reception end)
//!   ---------------------------       ------------------------
//!   A [0 ........ 10)                 push A            A
//!      B [2 .. 5)                     push B            B A
//!              C [6 ....... 14)       pop B, push C     A C
//! ```

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{InterferenceError, InterferenceResult};
use crate::frame::AirFrame;
use crate::signal::Signal;
use crate::time::SimTime;

/// Active interferer, ordered so the earliest reception end is on top.
///
/// The end time is copied out of the signal when it is pushed, so the heap
/// order cannot change while the entry is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingEnd {
    reception_end: SimTime,
    index: usize,
}

impl Ord for PendingEnd {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earlier end comes first
        other
            .reception_end
            .cmp(&self.reception_end)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for PendingEnd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-bin maximum interference seen by `reference` during `[start, end]`.
///
/// Interferers sharing the reference's tree id are skipped, as are those
/// that cannot overlap the window. The result lives on the reference's
/// spectrum; its populated range is the union of the contributing
/// interferers' ranges.
///
/// Fails with [`InterferenceError::UnsortedInterferers`] when the relevant
/// interferers are not ascending by reception start and with
/// [`InterferenceError::SpectrumMismatch`] when one uses another spectrum.
pub fn max_interference(
    start: SimTime,
    end: SimTime,
    reference: &AirFrame,
    interferers: &[AirFrame],
) -> InterferenceResult<Signal> {
    let spectrum = reference.signal().spectrum().clone();
    let mut max_interference = Signal::new(spectrum.clone());
    let mut current_interference = Signal::new(spectrum.clone());
    let mut signal_endings: BinaryHeap<PendingEnd> = BinaryHeap::new();
    let mut current_time: Option<SimTime> = None;
    let mut touched: Option<(usize, usize)> = None;

    for (index, frame) in interferers.iter().enumerate() {
        if frame.tree_id() == reference.tree_id() {
            continue;
        }
        let signal = frame.signal();
        if signal.reception_end() <= start || signal.reception_start() > end {
            continue;
        }

        if let Some(previous) = current_time {
            if signal.reception_start() < previous {
                tracing::warn!(
                    %previous,
                    start = %signal.reception_start(),
                    "Interferers not sorted by reception start"
                );
                return Err(InterferenceError::UnsortedInterferers {
                    previous,
                    start: signal.reception_start(),
                });
            }
        }
        if *signal.spectrum() != spectrum {
            return Err(InterferenceError::SpectrumMismatch);
        }

        let now = signal.reception_start();
        current_time = Some(now);
        if now >= end {
            break;
        }

        while let Some(top) = signal_endings.peek().copied() {
            if top.reception_end > now {
                break;
            }
            signal_endings.pop();
            current_interference -= interferers[top.index].signal();
        }

        // A zero-length signal is never on the air
        if signal.reception_end() <= now || signal.is_data_empty() {
            continue;
        }

        current_interference += signal;
        signal_endings.push(PendingEnd {
            reception_end: signal.reception_end(),
            index,
        });

        for bin in signal.data_start()..signal.data_end() {
            let seen = max_interference.at_mut(bin);
            *seen = seen.max(current_interference.at(bin));
        }
        touched = Some(match touched {
            Some((lo, hi)) => (lo.min(signal.data_start()), hi.max(signal.data_end())),
            None => (signal.data_start(), signal.data_end()),
        });
    }

    tracing::trace!(
        %start,
        %end,
        interferers = interferers.len(),
        active_at_end = signal_endings.len(),
        "Computed interference envelope"
    );

    match touched {
        Some((lo, hi)) => max_interference.with_data_range(lo, hi),
        None => Ok(max_interference),
    }
}
