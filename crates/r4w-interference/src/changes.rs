//! Signal change extraction
//!
//! Turns a set of frames into the starts and ends that matter for a query
//! window `[start, end]`. Changes strictly before `start` are kept (they are
//! replayed to establish the interference at `start`); ends after `end` are
//! dropped, so a signal still on the air at the window's end simply never
//! leaves.
//!
//! Simultaneous changes are always aggregated by the consumers before the
//! interference is read, so ties are not ordered any further.

use crate::frame::{AirFrame, FrameId};
use crate::signal::Signal;
use crate::time::SimTime;

/// Whether a signal enters or leaves the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Starting,
    Ending,
}

/// One start or end of a signal
#[derive(Debug, Clone, Copy)]
pub struct SignalChange<'a> {
    pub signal: &'a Signal,
    pub kind: ChangeType,
    pub time: SimTime,
}

/// Collect the changes relevant to `[start, end]`, skipping `exclude`.
///
/// For a point query (`start == end`) a signal starting exactly at that
/// instant contributes its start only. Otherwise a signal contributes its
/// start when it overlaps the window and its end when that end is `<= end`.
pub fn calculate_changes<'a>(
    start: SimTime,
    end: SimTime,
    frames: &'a [AirFrame],
    exclude: Option<FrameId>,
) -> Vec<SignalChange<'a>> {
    let mut changes = Vec::with_capacity(frames.len() * 2);

    for frame in frames {
        if Some(frame.id()) == exclude {
            continue;
        }

        let signal = frame.signal();
        if start == end && signal.reception_start() == start {
            changes.push(SignalChange {
                signal,
                kind: ChangeType::Starting,
                time: signal.reception_start(),
            });
            continue;
        }

        if signal.overlaps(start, end) {
            changes.push(SignalChange {
                signal,
                kind: ChangeType::Starting,
                time: signal.reception_start(),
            });
            if signal.reception_end() <= end {
                changes.push(SignalChange {
                    signal,
                    kind: ChangeType::Ending,
                    time: signal.reception_end(),
                });
            }
        }
    }

    changes
}

/// Stable sort by time.
pub fn sort_changes(changes: &mut [SignalChange<'_>]) {
    changes.sort_by_key(|change| change.time);
}

/// [`calculate_changes`] followed by [`sort_changes`].
pub fn sorted_changes<'a>(
    start: SimTime,
    end: SimTime,
    frames: &'a [AirFrame],
    exclude: Option<FrameId>,
) -> Vec<SignalChange<'a>> {
    let mut changes = calculate_changes(start, end, frames, exclude);
    sort_changes(&mut changes);
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::Spectrum;

    fn frame(start: i64, end: i64) -> AirFrame {
        let spectrum = Spectrum::uniform(1e9, 1e6, 1).unwrap();
        AirFrame::new(
            Signal::from_values(
                spectrum,
                vec![1.0],
                SimTime::from_micros(start),
                SimTime::from_micros(end),
            )
            .unwrap(),
        )
    }

    fn summary(changes: &[SignalChange<'_>]) -> Vec<(ChangeType, i64)> {
        changes
            .iter()
            .map(|c| (c.kind, c.time.as_picos() / 1_000_000))
            .collect()
    }

    #[test]
    fn test_window_clipping() {
        let frames = vec![
            frame(0, 5),   // ends before window: dropped
            frame(5, 15),  // start before window, end inside
            frame(12, 30), // start inside, end after window
            frame(20, 25), // starts at window end: dropped
        ];
        let changes = sorted_changes(
            SimTime::from_micros(10),
            SimTime::from_micros(20),
            &frames,
            None,
        );
        assert_eq!(
            summary(&changes),
            vec![
                (ChangeType::Starting, 5),
                (ChangeType::Starting, 12),
                (ChangeType::Ending, 15),
            ]
        );
    }

    #[test]
    fn test_end_on_window_boundary_included() {
        let frames = vec![frame(0, 10)];
        let changes = sorted_changes(SimTime::ZERO, SimTime::from_micros(10), &frames, None);
        assert_eq!(
            summary(&changes),
            vec![(ChangeType::Starting, 0), (ChangeType::Ending, 10)]
        );
    }

    #[test]
    fn test_point_query() {
        let frames = vec![frame(5, 10), frame(0, 7), frame(7, 9)];
        let at = SimTime::from_micros(7);
        let changes = sorted_changes(at, at, &frames, None);
        // (0,7) has ended and (7,9) starts exactly now
        assert_eq!(
            summary(&changes),
            vec![(ChangeType::Starting, 5), (ChangeType::Starting, 7)]
        );
    }

    #[test]
    fn test_excluded_frame_skipped() {
        let frames = vec![frame(0, 10), frame(2, 8)];
        let changes = calculate_changes(
            SimTime::ZERO,
            SimTime::from_micros(10),
            &frames,
            Some(frames[0].id()),
        );
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| std::ptr::eq(c.signal, frames[1].signal())));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let frames = vec![frame(0, 5), frame(5, 9)];
        let changes = sorted_changes(SimTime::ZERO, SimTime::from_micros(10), &frames, None);
        // The end of the first frame and the start of the second share t = 5
        assert_eq!(
            summary(&changes),
            vec![
                (ChangeType::Starting, 0),
                (ChangeType::Ending, 5),
                (ChangeType::Starting, 5),
                (ChangeType::Ending, 9),
            ]
        );
    }
}
