//! Period Smoothing
//!
//! ## Overview
//!
//! Raw period measurements jitter by a sample or two and occasionally pick up
//! a wave that breaks the rhythm. Two independent smoothers are kept:
//!
//! - An **EMA** per event stream (right peaks, left peaks, zero crossings),
//!   initialised by its first sample and blended with β = 0.2 afterwards.
//! - A bounded **history** of raw periods (50 entries, oldest evicted) that
//!   supports a tail average over the most recent N values.
//!
//! ## Stream Topology
//!
//! ```text
//! right peak ──► right EMA ─┐
//!                           ├──► peaks history ──► tail average (Peaks mode)
//! left peak  ──► left EMA  ─┘
//!
//! zero cross ──► half EMA  ────► zero history  ──► tail average (Zero×2 mode)
//! ```
//!
//! Right and left periods feed separate EMAs, so an asymmetric roll (a list
//! caused by wind or cargo) shows up as two different numbers, but they
//! share one history. The tail average in Peaks mode is therefore a blend of
//! both sides.

use heapless::Deque;

use crate::{
    config::{AverageCount, PeriodMode},
    constants::{EMA_BETA, PERIOD_HISTORY_CAPACITY},
    events::PeakSide,
};

/// Exponential moving average that starts undefined
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ema {
    value: Option<f64>,
    beta: f64,
}

impl Ema {
    /// Create an undefined EMA with blend factor `beta`
    pub const fn new(beta: f64) -> Self {
        Self { value: None, beta }
    }

    /// Blend in a sample; the first sample is taken as-is
    pub fn update(&mut self, sample: f64) -> f64 {
        let next = match self.value {
            None => sample,
            Some(current) => (1.0 - self.beta) * current + self.beta * sample,
        };
        self.value = Some(next);
        next
    }

    /// Current value, `None` until the first sample
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Forget the current value
    pub fn clear(&mut self) {
        self.value = None;
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self::new(EMA_BETA)
    }
}

/// FIFO of the most recent raw periods
#[derive(Debug, Clone)]
pub struct PeriodHistory<const N: usize> {
    values: Deque<f64, N>,
}

impl<const N: usize> PeriodHistory<N> {
    /// Creates an empty history
    pub const fn new() -> Self {
        Self { values: Deque::new() }
    }

    /// Append a period, evicting the oldest when full
    pub fn push(&mut self, period: f64) {
        if self.values.is_full() {
            self.values.pop_front();
        }
        // Room was made above, so this cannot fail
        let _ = self.values.push_back(period);
    }

    /// Mean of the `n` most recently pushed values.
    ///
    /// Uses fewer values when the history is shorter; `None` when empty or
    /// when `n == 0`.
    pub fn tail_average(&self, n: usize) -> Option<f64> {
        let len = self.values.len();
        let count = n.min(len);
        if count == 0 {
            return None;
        }

        let sum: f64 = self.values.iter().skip(len - count).sum();
        Some(sum / count as f64)
    }

    /// Number of stored periods
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Oldest stored period
    pub fn oldest(&self) -> Option<f64> {
        self.values.front().copied()
    }

    /// Newest stored period
    pub fn newest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Drop every stored period
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<const N: usize> Default for PeriodHistory<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// History type used by the engine
pub type RawPeriodHistory = PeriodHistory<PERIOD_HISTORY_CAPACITY>;

/// All period smoothing state of the engine
#[derive(Debug, Clone, Default)]
pub struct PeriodSmoother {
    right: Ema,
    left: Ema,
    half: Ema,
    peaks: RawPeriodHistory,
    zero_doubled: RawPeriodHistory,
}

impl PeriodSmoother {
    /// Creates a smoother with every stream undefined
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a full period measured between two peaks on `side`
    pub fn record_peak(&mut self, side: PeakSide, period: f64) {
        match side {
            PeakSide::Right => self.right.update(period),
            PeakSide::Left => self.left.update(period),
        };
        self.peaks.push(period);
    }

    /// Record a doubled zero-crossing interval
    pub fn record_half(&mut self, half_period: f64) {
        self.half.update(half_period);
        self.zero_doubled.push(half_period);
    }

    /// EMA of right-side periods
    pub fn right(&self) -> Option<f64> {
        self.right.value()
    }

    /// EMA of left-side periods
    pub fn left(&self) -> Option<f64> {
        self.left.value()
    }

    /// EMA of doubled zero-crossing intervals
    pub fn half(&self) -> Option<f64> {
        self.half.value()
    }

    /// Shared history of right and left peak periods
    pub fn peaks_history(&self) -> &RawPeriodHistory {
        &self.peaks
    }

    /// History of doubled zero-crossing intervals
    pub fn zero_history(&self) -> &RawPeriodHistory {
        &self.zero_doubled
    }

    /// Tail average of the history selected by `mode`
    pub fn chosen_average(&self, mode: PeriodMode, count: AverageCount) -> Option<f64> {
        let history = match mode {
            PeriodMode::Peaks => &self.peaks,
            PeriodMode::ZeroCrossDoubled => &self.zero_doubled,
        };
        history.tail_average(count.get())
    }

    /// Reset every EMA and history
    pub fn clear(&mut self) {
        self.right.clear();
        self.left.clear();
        self.half.clear();
        self.peaks.clear();
        self.zero_doubled.clear();
    }
}
