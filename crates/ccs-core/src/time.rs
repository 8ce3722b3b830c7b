//! Continuous simulation time.
//!
//! # Design
//!
//! Simulated time is a real-valued instant: arrivals come from exponential
//! inter-arrival sampling and handling ends fall wherever the gamma draw puts
//! them, so an integer tick cannot represent the event stream.  `SimTime`
//! wraps `f64` and supplies the total ordering the event queues need
//! (`f64` alone is only partially ordered).
//!
//! Two rounding rules from the handling protocol live here:
//!
//! - [`SimTime::round2`] — handling-completion events fire at the projected
//!   end rounded to two decimals.
//! - [`SimTime::round_whole`] — the "ends in the past" guard compares
//!   whole-rounded instants.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// An absolute simulated instant.
///
/// Ordering is `f64::total_cmp`, so `SimTime` is `Ord` and usable as a
/// min-queue key.  The simulator never produces NaN instants; `INFINITY` is
/// the "no event" sentinel used by the dispatch loop.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);
    pub const INFINITY: SimTime = SimTime(f64::INFINITY);

    #[inline]
    pub fn new(t: f64) -> SimTime {
        SimTime(t)
    }

    /// Round to two decimal places.
    #[inline]
    pub fn round2(self) -> SimTime {
        SimTime((self.0 * 100.0).round() / 100.0)
    }

    /// Round to the nearest whole unit, as a plain `f64`.
    #[inline]
    pub fn round_whole(self) -> f64 {
        self.0.round()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    /// Advance an instant by a duration (durations are plain `f64`).
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl Sub for SimTime {
    type Output = f64;
    /// The duration elapsed from `rhs` to `self`.
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl From<f64> for SimTime {
    #[inline]
    fn from(t: f64) -> SimTime {
        SimTime(t)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{:.2}", self.0)
    }
}
