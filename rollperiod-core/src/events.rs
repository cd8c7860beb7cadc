//! Event Types Emitted by the Detectors
//!
//! ## Overview
//!
//! Each tick the two detectors may report what they saw:
//!
//! - The **turning-point detector** reports a validated reversal of motion
//!   as a [`TurningPoint`]. The first reversal on a side only opens a period;
//!   later ones close it and carry the elapsed time, which is the
//!   [`PeakEvent`] fed to the smoother.
//! - The **zero-crossing detector** reports every sign change of the angle
//!   as a [`ZeroCrossing`]. When a previous crossing exists the interval is
//!   doubled into a [`ZeroEvent`].
//!
//! ```text
//!      right            right
//!       /\               /\
//!  ----/--\------+------/--\----- 0
//!     ^    \    /      ^
//!  rising   \  /     rising
//!             \/
//!            left
//! ```
//!
//! All events are `Copy` and stack-only so they can be embedded directly in a
//! [`Snapshot`](crate::snapshot::Snapshot).

use crate::time::Timestamp;

/// Side of a turning point, named after the motion that just ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeakSide {
    /// Reversal after moving in the positive direction
    Right,
    /// Reversal after moving in the negative direction
    Left,
}

impl PeakSide {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            PeakSide::Right => "right",
            PeakSide::Left => "left",
        }
    }

    /// The other side
    pub const fn opposite(&self) -> Self {
        match self {
            PeakSide::Right => PeakSide::Left,
            PeakSide::Left => PeakSide::Right,
        }
    }
}

/// Direction of an angle zero crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZeroDirection {
    /// Negative to non-negative
    Rising,
    /// Positive to non-positive
    Falling,
}

impl ZeroDirection {
    /// Human-readable name
    pub const fn name(&self) -> &'static str {
        match self {
            ZeroDirection::Rising => "rising",
            ZeroDirection::Falling => "falling",
        }
    }
}

/// A full period closed by two validated peaks on the same side
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakEvent {
    /// Side of both peaks
    pub side: PeakSide,
    /// Seconds since the previous peak on this side
    pub period: f64,
    /// Timestamp of the closing peak
    pub at: Timestamp,
}

/// A validated turning point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurningPoint {
    /// Which side reversed
    pub side: PeakSide,
    /// When it was validated
    pub at: Timestamp,
    /// Seconds since the previous peak on this side, `None` for the first
    pub period: Option<f64>,
}

impl TurningPoint {
    /// The period event this turning point closes, if any
    pub fn peak_event(&self) -> Option<PeakEvent> {
        self.period.map(|period| PeakEvent {
            side: self.side,
            period,
            at: self.at,
        })
    }
}

/// Half-period estimate from two consecutive zero crossings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZeroEvent {
    /// Direction of the closing crossing
    pub direction: ZeroDirection,
    /// Twice the crossing interval, i.e. a full-period estimate (s)
    pub half_period: f64,
    /// Timestamp of the closing crossing
    pub at: Timestamp,
}

/// A detected sign change of the angle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZeroCrossing {
    /// Direction of the crossing
    pub direction: ZeroDirection,
    /// When the crossing was observed
    pub at: Timestamp,
    /// Seconds since the previous crossing of either direction
    pub interval: Option<f64>,
}

impl ZeroCrossing {
    /// The accepted half-period event, if the interval is usable
    pub fn zero_event(&self) -> Option<ZeroEvent> {
        let half_period = 2.0 * self.interval?;
        if half_period.is_finite() && half_period > 0.0 {
            Some(ZeroEvent {
                direction: self.direction,
                half_period,
                at: self.at,
            })
        } else {
            None
        }
    }
}
