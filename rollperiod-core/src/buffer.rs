//! Sliding Regression Buffer
//!
//! ## Overview
//!
//! The quadratic fit needs the recent angle history expressed as "seconds
//! before now". Rather than storing absolute timestamps and subtracting on
//! every fit, this buffer stores relative ages directly and ages every entry
//! by `dt` whenever a new sample arrives.
//!
//! ## Layout
//!
//! Entries are kept newest-first in a fixed array:
//!
//! ```text
//! RegressionBuffer<5> after four inserts with dt = 0.02 s:
//! ┌────────┬────────┬────────┬────────┬────────┐
//! │ t=0.00 │ t=0.02 │ t=0.04 │ t=0.06 │  ----  │  ← age (s)
//! │ θ₃     │ θ₂     │ θ₁     │ θ₀     │        │  ← angle (rad)
//! └────────┴────────┴────────┴────────┴────────┘
//!    ↑ index 0 = newest                   ↑ unused until full
//! ```
//!
//! An insert shifts every entry one slot towards the old end, adding `dt`
//! to its age, and writes `(0, θ)` at index 0. When the buffer is full the
//! oldest entry falls off the end.
//!
//! ### Why shift instead of a ring?
//!
//! The fit reads the window as one contiguous slice and every age has to be
//! updated anyway, so the shift costs nothing extra over a ring buffer and
//! keeps `active_window` a plain `&[RegressionPoint]`. The work per insert
//! is bounded by the capacity (64).
//!
//! ## Usage Example
//!
//! ```rust
//! use rollperiod_core::buffer::SlidingRegressionBuffer;
//!
//! let mut buffer = SlidingRegressionBuffer::new();
//! buffer.insert(0.02, 0.010);
//! buffer.insert(0.02, 0.012);
//!
//! let window = buffer.active_window(8);
//! assert_eq!(window.len(), 2);
//! assert_eq!(window[0].t, 0.0);
//! assert_eq!(window[1].t, 0.02);
//! ```

use crate::constants::REGRESSION_CAPACITY;

/// One regression sample: age in seconds and angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegressionPoint {
    /// Seconds before the newest sample (0 for the newest)
    pub t: f64,
    /// Angle in radians
    pub angle: f64,
}

/// Fixed-capacity, newest-first buffer of regression samples
///
/// ## Internal Invariants
///
/// - `len <= N`
/// - `points[i].t <= points[i + 1].t` for every stored pair
/// - `points[0].t == 0.0` whenever the buffer is not empty
#[derive(Debug, Clone)]
pub struct RegressionBuffer<const N: usize> {
    points: [RegressionPoint; N],
    len: usize,
}

/// The buffer used by the engine, sized for the largest fit window
pub type SlidingRegressionBuffer = RegressionBuffer<REGRESSION_CAPACITY>;

impl<const N: usize> RegressionBuffer<N> {
    /// Creates an empty buffer
    pub const fn new() -> Self {
        Self {
            points: [RegressionPoint { t: 0.0, angle: 0.0 }; N],
            len: 0,
        }
    }

    /// Ages every stored sample by `dt` seconds and prepends `(0, angle)`.
    ///
    /// Callers must not pass `dt <= 0`; the engine drops such ticks before
    /// they reach the buffer.
    pub fn insert(&mut self, dt: f64, angle: f64) {
        debug_assert!(dt > 0.0, "regression buffer insert with dt = {}", dt);

        if N == 0 {
            return;
        }

        // Walk from the old end so nothing is overwritten before it moves.
        let keep = self.len.min(N - 1);
        for i in (0..keep).rev() {
            self.points[i + 1] = RegressionPoint {
                t: self.points[i].t + dt,
                angle: self.points[i].angle,
            };
        }

        self.points[0] = RegressionPoint { t: 0.0, angle };

        if self.len < N {
            self.len += 1;
        }
    }

    /// The `min(len, window_size)` newest samples, newest first
    pub fn active_window(&self, window_size: usize) -> &[RegressionPoint] {
        &self.points[..self.len.min(window_size)]
    }

    /// Number of stored samples
    pub fn count(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// The newest sample, if any
    pub fn newest(&self) -> Option<&RegressionPoint> {
        self.get(0)
    }

    /// Sample by age rank (0 = newest)
    pub fn get(&self, index: usize) -> Option<&RegressionPoint> {
        if index < self.len {
            Some(&self.points[index])
        } else {
            None
        }
    }

    /// Forget every sample and zero the storage in place
    pub fn clear(&mut self) {
        self.points = [RegressionPoint::default(); N];
        self.len = 0;
    }
}

impl<const N: usize> Default for RegressionBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
