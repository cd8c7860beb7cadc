//! Roll Estimation Engine
//!
//! ## Overview
//!
//! [`RollEngine`] owns every piece of estimator state and advances it one
//! sample at a time. Each accepted tick runs the same pipeline:
//!
//! ```text
//! (timestamp, angle)
//!      │  × sign flip
//!      ▼
//! regression buffer ──► quadratic fit ──► velocity, acceleration, SNR
//!      │                     │
//!      │                     ▼
//!      │            turning-point detector ──► right / left EMA ─┐
//!      │                                                          ├─► histories
//!      └──────────► zero-crossing detector ──► half EMA ─────────┘
//!                                                   │
//!                                                   ▼
//!                                               Snapshot
//! ```
//!
//! ## Tick Rules
//!
//! - The very first sample only establishes the time base.
//! - A sample whose timestamp does not advance (`dt ≤ 0`) is ignored
//!   completely; the time base stays where it was.
//! - Non-finite angles are ignored the same way.
//!
//! Ignored ticks still return a snapshot, flagged `skipped`, so a display
//! loop can redraw unconditionally.
//!
//! ## Configuration
//!
//! The configuration is copied once at the start of each tick. Changing it
//! between ticks only affects later ticks; buffered samples, EMAs and
//! histories are never rewritten.
//!
//! ```rust
//! use rollperiod_core::{RollEngine, PeriodMode};
//!
//! let mut engine = RollEngine::new();
//! engine.configure(16, 5, -1, PeriodMode::ZeroCrossDoubled).unwrap();
//!
//! let first = engine.process_sample(0, 0.01);
//! assert!(first.skipped);
//!
//! let second = engine.process_sample(20_000_000, 0.02);
//! assert!(!second.skipped);
//! assert!((second.angle_deg + 0.02_f64.to_degrees()).abs() < 1e-9);
//! ```

use crate::{
    buffer::SlidingRegressionBuffer,
    config::{EngineConfig, PeriodMode},
    detectors::{TurningPointDetector, ZeroCrossingDetector},
    errors::{ConfigResult, SourceError},
    events::{TurningPoint, ZeroCrossing},
    fit::{fit_window, FitOutcome},
    smoother::PeriodSmoother,
    snapshot::{degrees, EnginePhase, Snapshot},
    snr::SnrReading,
    source::AngleSource,
    time::{seconds_between, Timestamp},
};

/// Mutable estimator state, cleared by [`RollEngine::reset`]
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    buffer: SlidingRegressionBuffer,
    last_timestamp: Option<Timestamp>,
    angle: f64,
    fit: Option<FitOutcome>,
    turning: TurningPointDetector,
    zero: ZeroCrossingDetector,
    periods: PeriodSmoother,
}

impl EngineState {
    /// Regression buffer, newest sample first
    pub fn buffer(&self) -> &SlidingRegressionBuffer {
        &self.buffer
    }

    /// Timestamp of the last accepted sample
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.last_timestamp
    }

    /// Latest fit, `None` until the window holds enough samples
    pub fn fit(&self) -> Option<&FitOutcome> {
        self.fit.as_ref()
    }

    /// Turning-point detector
    pub fn turning_points(&self) -> &TurningPointDetector {
        &self.turning
    }

    /// Zero-crossing detector
    pub fn zero_crossings(&self) -> &ZeroCrossingDetector {
        &self.zero
    }

    /// EMAs and period histories
    pub fn periods(&self) -> &PeriodSmoother {
        &self.periods
    }

    /// Position in the per-tick state machine
    pub fn phase(&self) -> EnginePhase {
        if self.buffer.is_empty() {
            return EnginePhase::Idle;
        }
        match self.fit {
            None => EnginePhase::Filling,
            Some(FitOutcome::Fit(_)) => EnginePhase::Fitting,
            Some(FitOutcome::Fallback(_)) => EnginePhase::Degenerate,
        }
    }

    fn clear(&mut self) {
        self.buffer.clear();
        self.last_timestamp = None;
        self.angle = 0.0;
        self.fit = None;
        self.turning.clear();
        self.zero.clear();
        self.periods.clear();
    }
}

/// Streaming roll angle, rate and period estimator
#[derive(Debug, Clone, Default)]
pub struct RollEngine {
    config: EngineConfig,
    state: EngineState,
}

impl RollEngine {
    /// Engine with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a validated configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::default(),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of the estimator state
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Replace the configuration from raw values.
    ///
    /// Nothing changes when any value is rejected.
    pub fn configure(
        &mut self,
        window_size: usize,
        average_count: usize,
        sign_flip: i8,
        mode: PeriodMode,
    ) -> ConfigResult<()> {
        let config = EngineConfig::from_raw(window_size, average_count, sign_flip, mode)?;
        self.set_config(config);
        Ok(())
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: EngineConfig) {
        log_info!(
            "engine configured: window {}, average {}, flip {}, mode {}",
            config.window_size.get(),
            config.average_count.get(),
            config.sign_flip.factor(),
            config.mode.label()
        );
        self.config = config;
    }

    /// Drop all estimator state; the configuration is kept
    pub fn reset(&mut self) {
        self.state.clear();
        log_info!("engine reset");
    }

    /// Process one angle sample (radians, before sign flip).
    pub fn process_sample(&mut self, timestamp: Timestamp, angle_rad: f64) -> Snapshot {
        let config = self.config;

        if !angle_rad.is_finite() {
            log_warn!("non-finite angle at {} ns ignored", timestamp);
            return self.skipped(timestamp);
        }
        let angle = angle_rad * config.sign_flip.factor();

        let dt = match self.state.last_timestamp {
            None => {
                self.state.last_timestamp = Some(timestamp);
                log_trace!("time base set at {} ns", timestamp);
                return self.skipped(timestamp);
            }
            Some(last) => seconds_between(last, timestamp),
        };

        if dt < 0.0 {
            log_warn!("timestamp went backwards by {:.6} s, sample ignored", -dt);
            return self.skipped(timestamp);
        }
        if dt == 0.0 {
            log_debug!("duplicate timestamp {} ns ignored", timestamp);
            return self.skipped(timestamp);
        }

        let state = &mut self.state;
        state.last_timestamp = Some(timestamp);
        state.angle = angle;
        state.buffer.insert(dt, angle);

        if let Some(outcome) = fit_window(state.buffer.active_window(config.window_size.get()), dt) {
            if outcome.is_fallback() {
                log_trace!("singular window at {} ns, two-point fallback", timestamp);
            }
            state.fit = Some(outcome);
        }

        let (velocity, acceleration) = state
            .fit
            .map_or((0.0, 0.0), |f| (f.result().velocity, f.result().acceleration));

        log_trace!(
            "tick {} ns: dt {:.4} s, angle {:.5} rad, vel {:.5} rad/s, accel {:.5} rad/s²",
            timestamp, dt, angle, velocity, acceleration
        );

        let turning_point = state.turning.update(velocity, acceleration, angle, timestamp);
        if let Some(event) = turning_point.and_then(|tp| tp.peak_event()) {
            state.periods.record_peak(event.side, event.period);
        }

        let previous = state.buffer.get(1).map_or(angle, |p| p.angle);
        let zero_crossing = state.zero.update(angle, previous, timestamp);
        if let Some(event) = zero_crossing.and_then(|zc| zc.zero_event()) {
            state.periods.record_half(event.half_period);
        }

        self.build_snapshot(Some(timestamp), false, turning_point, zero_crossing)
    }

    /// Snapshot of the current state without processing a sample
    pub fn snapshot(&self) -> Snapshot {
        self.build_snapshot(self.state.last_timestamp, false, None, None)
    }

    /// Feed every sample `source` has ready, handing each snapshot to `sink`.
    ///
    /// Stops when the source would block or is exhausted and returns the
    /// number of samples pulled. Device errors are passed through.
    pub fn drain<S, F>(&mut self, source: &mut S, mut sink: F) -> Result<usize, S::Error>
    where
        S: AngleSource,
        F: FnMut(&Snapshot),
    {
        let mut pulled = 0;
        loop {
            match source.poll_sample() {
                Ok(sample) => {
                    pulled += 1;
                    let snapshot = self.process_sample(sample.timestamp, sample.angle);
                    sink(&snapshot);
                }
                Err(nb::Error::WouldBlock) => return Ok(pulled),
                Err(nb::Error::Other(SourceError::EndOfStream)) => {
                    log_debug!("angle source exhausted after {} samples", pulled);
                    return Ok(pulled);
                }
                Err(nb::Error::Other(SourceError::Device(e))) => return Err(e),
            }
        }
    }

    fn skipped(&self, timestamp: Timestamp) -> Snapshot {
        self.build_snapshot(Some(timestamp), true, None, None)
    }

    fn build_snapshot(
        &self,
        timestamp: Option<Timestamp>,
        skipped: bool,
        turning_point: Option<TurningPoint>,
        zero_crossing: Option<ZeroCrossing>,
    ) -> Snapshot {
        let state = &self.state;
        let fit = state.fit.map(|f| *f.result());

        Snapshot {
            timestamp,
            phase: state.phase(),
            skipped,
            angle_deg: degrees(state.angle),
            velocity_deg_s: fit.map_or(0.0, |f| degrees(f.velocity)),
            acceleration_deg_s2: fit.map_or(0.0, |f| degrees(f.acceleration)),
            period_right_s: state.periods.right(),
            period_left_s: state.periods.left(),
            period_chosen_avg_s: state
                .periods
                .chosen_average(self.config.mode, self.config.average_count),
            period_half_s: state.periods.half(),
            snr_db: fit.map(|f| SnrReading::from_fit(&f).db),
            last_zero_direction: state.zero.last_direction(),
            has_right_peak: state.turning.has_right_peak(),
            has_left_peak: state.turning.has_left_peak(),
            mode: self.config.mode,
            turning_point,
            zero_crossing,
        }
    }
}
