//! Simulation time
//!
//! Signal boundaries are compared for exact equality when simultaneous
//! changes are grouped, so time is kept as an integer picosecond count
//! rather than a float.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

const PICOS_PER_SEC: f64 = 1e12;

/// Fixed-point simulation time with picosecond resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(i64);

impl SimTime {
    /// Simulation epoch
    pub const ZERO: SimTime = SimTime(0);
    /// Latest representable instant
    pub const MAX: SimTime = SimTime(i64::MAX);

    /// Create from picoseconds.
    pub const fn from_picos(picos: i64) -> Self {
        Self(picos)
    }

    /// Create from nanoseconds.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos.saturating_mul(1_000))
    }

    /// Create from microseconds.
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros.saturating_mul(1_000_000))
    }

    /// Create from milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000_000_000))
    }

    /// Create from seconds, rounded to the nearest picosecond.
    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * PICOS_PER_SEC).round() as i64)
    }

    /// Picoseconds since the epoch.
    #[inline]
    pub const fn as_picos(&self) -> i64 {
        self.0
    }

    /// Seconds since the epoch.
    #[inline]
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / PICOS_PER_SEC
    }
}

impl Add for SimTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for SimTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.as_secs_f64())
    }
}
