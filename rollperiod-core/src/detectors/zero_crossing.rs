//! Zero-crossing detector
//!
//! Compares the newest angle with the one buffered just before it. A sign
//! change, counting an exact zero on the new side, is a crossing:
//!
//! ```text
//!   rising   θ ≥ 0 and θ_prev < 0
//!   falling  θ ≤ 0 and θ_prev > 0
//! ```
//!
//! Rising is tested first. The two conditions need `θ_prev` strictly
//! negative and strictly positive respectively, so they never both hold and
//! a run of exact zeros produces no crossing at all.
//!
//! Crossings alternate direction, so consecutive crossings are half a period
//! apart regardless of direction. Every crossing is recorded, even when its
//! interval is unusable.

use crate::{
    events::{ZeroCrossing, ZeroDirection},
    time::{seconds_between, Timestamp},
};

/// Sign-change detector on the raw angle
#[derive(Debug, Clone, Default)]
pub struct ZeroCrossingDetector {
    last_zero: Option<Timestamp>,
    last_direction: Option<ZeroDirection>,
}

impl ZeroCrossingDetector {
    /// Creates a detector with no crossing recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the newest angle against the previous buffered one.
    ///
    /// On the first buffered sample callers pass the angle itself as
    /// `previous`, which can never register as a crossing.
    pub fn update(&mut self, angle: f64, previous: f64, now: Timestamp) -> Option<ZeroCrossing> {
        let direction = if angle >= 0.0 && previous < 0.0 {
            ZeroDirection::Rising
        } else if angle <= 0.0 && previous > 0.0 {
            ZeroDirection::Falling
        } else {
            return None;
        };

        let interval = self.last_zero.map(|earlier| seconds_between(earlier, now));
        self.last_zero = Some(now);
        self.last_direction = Some(direction);

        log_debug!("{} zero crossing at {} ns, interval {:?} s", direction.name(), now, interval);

        Some(ZeroCrossing { direction, at: now, interval })
    }

    /// Direction of the most recent crossing
    pub fn last_direction(&self) -> Option<ZeroDirection> {
        self.last_direction
    }

    /// Timestamp of the most recent crossing
    pub fn last_zero(&self) -> Option<Timestamp> {
        self.last_zero
    }

    /// Forget every recorded crossing
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
