//! Output snapshot handed to the display layer
//!
//! A snapshot is a plain value: everything a display needs to draw one
//! frame, in display units (degrees, seconds, dB). It borrows nothing from
//! the engine, so it can be queued, logged or serialised freely.
//!
//! Quantities that do not exist yet are `None` rather than NaN:
//!
//! - period EMAs before the first period on their stream
//! - tail averages while the chosen history is empty
//! - SNR before the first fit

use crate::{
    config::PeriodMode,
    events::{PeakEvent, TurningPoint, ZeroCrossing, ZeroDirection, ZeroEvent},
    time::Timestamp,
};

/// Where the engine is in its per-tick state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnginePhase {
    /// Nothing buffered
    #[default]
    Idle,
    /// Fewer samples than the fit needs
    Filling,
    /// Least-squares fit running
    Fitting,
    /// Window singular, two-point fallback in use
    Degenerate,
}

/// Engine output after one tick
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Timestamp of the tick that produced this snapshot
    pub timestamp: Option<Timestamp>,
    /// State machine position after the tick
    pub phase: EnginePhase,
    /// True when the tick was dropped (first sample, duplicate or backwards
    /// timestamp, non-finite angle)
    pub skipped: bool,

    /// Latest angle after the sign flip (°)
    pub angle_deg: f64,
    /// Fitted angular velocity (°/s)
    pub velocity_deg_s: f64,
    /// Fitted angular acceleration (°/s²)
    pub acceleration_deg_s2: f64,

    /// EMA of right-side periods (s)
    pub period_right_s: Option<f64>,
    /// EMA of left-side periods (s)
    pub period_left_s: Option<f64>,
    /// Tail average of the history selected by `mode` (s)
    pub period_chosen_avg_s: Option<f64>,
    /// EMA of doubled zero-crossing intervals (s)
    pub period_half_s: Option<f64>,

    /// Fit SNR (dB), saturates at 99
    pub snr_db: Option<f64>,

    /// Direction of the latest zero crossing
    pub last_zero_direction: Option<ZeroDirection>,
    /// A right turning point has been validated since reset
    pub has_right_peak: bool,
    /// A left turning point has been validated since reset
    pub has_left_peak: bool,

    /// Mode behind `period_chosen_avg_s`
    pub mode: PeriodMode,

    /// Turning point validated on this tick
    pub turning_point: Option<TurningPoint>,
    /// Zero crossing detected on this tick
    pub zero_crossing: Option<ZeroCrossing>,
}

impl Snapshot {
    /// Output of a freshly constructed or reset engine
    pub fn initial(mode: PeriodMode) -> Self {
        Self {
            timestamp: None,
            phase: EnginePhase::Idle,
            skipped: false,
            angle_deg: 0.0,
            velocity_deg_s: 0.0,
            acceleration_deg_s2: 0.0,
            period_right_s: None,
            period_left_s: None,
            period_chosen_avg_s: None,
            period_half_s: None,
            snr_db: None,
            last_zero_direction: None,
            has_right_peak: false,
            has_left_peak: false,
            mode,
            turning_point: None,
            zero_crossing: None,
        }
    }

    /// Period closed on this tick by a turning point
    pub fn peak_event(&self) -> Option<PeakEvent> {
        self.turning_point.and_then(|tp| tp.peak_event())
    }

    /// Half-period accepted on this tick
    pub fn zero_event(&self) -> Option<ZeroEvent> {
        self.zero_crossing.and_then(|zc| zc.zero_event())
    }

    /// True when `snr_db` is the saturation sentinel
    pub fn snr_saturated(&self) -> bool {
        self.snr_db == Some(crate::constants::SNR_SATURATION_DB)
    }
}

/// Radians to degrees
pub(crate) fn degrees(radians: f64) -> f64 {
    radians * (180.0 / core::f64::consts::PI)
}
