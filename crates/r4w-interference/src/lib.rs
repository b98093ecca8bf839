//! # Interference and SINR over Time-Bounded Signals
//!
//! This crate computes the interference a receiver sees on a shared channel
//! from many overlapping transmissions, each described by a per-bin power
//! [`Signal`] that is on the air during a half-open reception interval.
//!
//! ## Overview
//!
//! - **Sweep**: global maximum / minimum interference and per-bin minimum
//!   over a time window ([`global_max`], [`global_min`], [`min_at_freq_index`])
//! - **Envelope**: per-bin worst-case interference seen by one frame
//!   ([`max_interference`])
//! - **Clear channel assessment**: threshold test that attenuates
//!   interferers only as far as needed ([`is_channel_power_below_threshold`])
//! - **SINR**: minimum signal to interference plus noise ratio of a frame
//!   ([`min_sinr`])
//!
//! ## Data Flow
//!
//! ```text
//! AirFrames → signal changes → time sort → sweep → max / min
//!                                    └──→ envelope → signal / (envelope + noise) → min SINR
//! ```
//!
//! ## Example
//!
//! ```rust
//! use r4w_interference::prelude::*;
//!
//! let spectrum = Spectrum::uniform(5.89e9, 10e6, 1).unwrap();
//! let us = SimTime::from_micros;
//! let frames = vec![
//!     AirFrame::new(Signal::from_values(spectrum.clone(), vec![1.0], us(0), us(10)).unwrap()),
//!     AirFrame::new(Signal::from_values(spectrum, vec![2.0], us(5), us(15)).unwrap()),
//! ];
//!
//! assert_eq!(global_max(us(0), us(15), &frames).unwrap(), 3.0);
//! assert_eq!(global_min(us(0), us(15), &frames).unwrap(), 1.0);
//! ```
//!
//! ## Contracts
//!
//! Interferers handed to [`max_interference`] and [`min_sinr`] must be sorted
//! by reception start, and all signals in one call must share a spectrum.
//! Violations are reported as errors for which
//! [`InterferenceError::is_contract_violation`] is true. The threshold and
//! SINR computations attenuate the frames they are given in place.

pub mod analogue;
pub mod changes;
pub mod config;
pub mod envelope;
pub mod error;
pub mod frame;
pub mod observe;
pub mod signal;
pub mod sinr;
pub mod spectrum;
pub mod sweep;
pub mod threshold;
pub mod time;
pub mod units;

pub use analogue::{AnalogueModel, AnalogueModelList, ConstantAttenuation, SimplePathloss};
pub use config::{ChannelSensor, ConfigError, InterferenceConfig};
pub use envelope::max_interference;
pub use error::{InterferenceError, InterferenceResult};
pub use frame::{AirFrame, FrameId};
pub use signal::Signal;
pub use sinr::{min_sinr, min_sinr_db};
pub use spectrum::Spectrum;
pub use sweep::{global_max, global_min, min_at_freq_index};
pub use threshold::is_channel_power_below_threshold;
pub use time::SimTime;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analogue::{analogue_model_list, AnalogueModel, AnalogueModelList};
    pub use crate::envelope::max_interference;
    pub use crate::error::{InterferenceError, InterferenceResult};
    pub use crate::frame::{AirFrame, FrameId};
    pub use crate::signal::Signal;
    pub use crate::sinr::{min_sinr, min_sinr_db};
    pub use crate::spectrum::Spectrum;
    pub use crate::sweep::{global_max, global_min, min_at_freq_index};
    pub use crate::threshold::is_channel_power_below_threshold;
    pub use crate::time::SimTime;
}
