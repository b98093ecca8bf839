//! Air frames: a transmission's signal plus its identity
//!
//! Two identities are tracked. The [`FrameId`] is unique per frame object and
//! is what "exclude this frame" means when extracting signal changes or
//! testing the channel. The tree id is shared by all duplicates of one
//! transmission, so the interference envelope can skip copies of the signal
//! of interest that reached the receiver through another code path.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::signal::Signal;

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique frame identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameId(u64);

impl FrameId {
    fn next() -> Self {
        Self(NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// A frame on the air carrying exactly one [`Signal`]
#[derive(Debug)]
pub struct AirFrame {
    id: FrameId,
    tree_id: u64,
    signal: Signal,
}

impl AirFrame {
    /// Wrap a signal in a new frame with its own tree id.
    pub fn new(signal: Signal) -> Self {
        let id = FrameId::next();
        Self {
            id,
            tree_id: id.as_u64(),
            signal,
        }
    }

    /// Copy this frame: a new frame id, the same tree id, a cloned signal.
    pub fn duplicate(&self) -> Self {
        Self {
            id: FrameId::next(),
            tree_id: self.tree_id,
            signal: self.signal.clone(),
        }
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn tree_id(&self) -> u64 {
        self.tree_id
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub fn signal_mut(&mut self) -> &mut Signal {
        &mut self.signal
    }
}
