//! Turning-point detector
//!
//! Follows the direction of motion through a deadband and reports a
//! reversal only when it looks physical:
//!
//! ```text
//!   direction  Idle ──► Positive ◄──► Negative
//!                        (sticky through |ω| < 0.2°/s)
//!
//!   candidate  previous ≠ Idle and direction flipped this tick
//!   validated  |θ| ≥ 1°                               (amplitude gate)
//!              |α| ≥ 2°/s² and α opposes previous     (deceleration gate)
//! ```
//!
//! A reversal after positive motion is a *right* turning point, after
//! negative motion a *left* one. Periods are measured between turning points
//! of the same side only, so the two sides can disagree when the roll is
//! lopsided.

use crate::{
    constants::{MIN_ALPHA_RAD_S2, MIN_AMPLITUDE_RAD, MIN_OMEGA_RAD_S},
    events::{PeakSide, TurningPoint},
    time::{seconds_between, Timestamp},
};

/// Direction of motion remembered between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionDirection {
    /// No motion outside the deadband seen yet
    #[default]
    Idle,
    /// Angle increasing
    Positive,
    /// Angle decreasing
    Negative,
}

impl MotionDirection {
    /// Classify a velocity, keeping `previous` inside the deadband
    pub fn from_velocity(velocity: f64, previous: MotionDirection) -> Self {
        let omega_eff = if libm::fabs(velocity) < MIN_OMEGA_RAD_S { 0.0 } else { velocity };
        if omega_eff > 0.0 {
            MotionDirection::Positive
        } else if omega_eff < 0.0 {
            MotionDirection::Negative
        } else {
            previous
        }
    }

    /// True when `acceleration` points against this direction
    fn is_opposed_by(&self, acceleration: f64) -> bool {
        match self {
            MotionDirection::Positive => acceleration < 0.0,
            MotionDirection::Negative => acceleration > 0.0,
            MotionDirection::Idle => false,
        }
    }
}

/// Gated detector of motion reversals
#[derive(Debug, Clone, Default)]
pub struct TurningPointDetector {
    last_direction: MotionDirection,
    last_right_peak: Option<Timestamp>,
    last_left_peak: Option<Timestamp>,
}

impl TurningPointDetector {
    /// Creates an idle detector
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tick of fitted motion.
    ///
    /// Returns the validated turning point, if this tick produced one. The
    /// direction state advances on every call, validated or not.
    pub fn update(
        &mut self,
        velocity: f64,
        acceleration: f64,
        angle: f64,
        now: Timestamp,
    ) -> Option<TurningPoint> {
        let previous = self.last_direction;
        let direction = MotionDirection::from_velocity(velocity, previous);
        self.last_direction = direction;

        // Direction is sticky, so a change away from Idle is always a flip
        if previous == MotionDirection::Idle || direction == previous {
            return None;
        }

        let amplitude_ok = libm::fabs(angle) >= MIN_AMPLITUDE_RAD;
        let decel_ok = libm::fabs(acceleration) >= MIN_ALPHA_RAD_S2
            && previous.is_opposed_by(acceleration);

        if !(amplitude_ok && decel_ok) {
            log_debug!(
                "turning point rejected: angle {:.4} rad, accel {:.4} rad/s² (amplitude ok: {}, decel ok: {})",
                angle, acceleration, amplitude_ok, decel_ok
            );
            return None;
        }

        let (side, last_peak) = match previous {
            MotionDirection::Positive => (PeakSide::Right, &mut self.last_right_peak),
            _ => (PeakSide::Left, &mut self.last_left_peak),
        };

        let period = last_peak.map(|earlier| seconds_between(earlier, now));
        *last_peak = Some(now);

        log_debug!("{} turning point at {} ns, period {:?} s", side.name(), now, period);

        Some(TurningPoint { side, at: now, period })
    }

    /// Direction after the most recent tick
    pub fn direction(&self) -> MotionDirection {
        self.last_direction
    }

    /// True once a right turning point has been validated
    pub fn has_right_peak(&self) -> bool {
        self.last_right_peak.is_some()
    }

    /// True once a left turning point has been validated
    pub fn has_left_peak(&self) -> bool {
        self.last_left_peak.is_some()
    }

    /// Return to the idle state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEG: f64 = core::f64::consts::PI / 180.0;
    const SECOND: Timestamp = 1_000_000_000;

    /// Drive the detector through a swing to starboard and back
    fn swing(detector: &mut TurningPointDetector, at: Timestamp, amplitude_deg: f64) -> Option<TurningPoint> {
        detector.update(5.0 * DEG, -1.0 * DEG, 0.5 * amplitude_deg * DEG, at);
        detector.update(-5.0 * DEG, -5.0 * DEG, amplitude_deg * DEG, at + SECOND)
    }

    #[test]
    fn first_motion_is_not_a_turning_point() {
        let mut detector = TurningPointDetector::new();
        assert!(detector.update(5.0 * DEG, -5.0 * DEG, 3.0 * DEG, 0).is_none());
        assert_eq!(detector.direction(), MotionDirection::Positive);
    }

    #[test]
    fn deadband_keeps_direction() {
        let mut detector = TurningPointDetector::new();
        detector.update(1.0 * DEG, 0.0, 0.0, 0);
        detector.update(0.1 * DEG, 0.0, 0.0, 1);
        detector.update(-0.15 * DEG, 0.0, 0.0, 2);
        assert_eq!(detector.direction(), MotionDirection::Positive);
        assert_eq!(MotionDirection::from_velocity(0.0, MotionDirection::Idle), MotionDirection::Idle);
    }

    #[test]
    fn right_peak_then_period() {
        let mut detector = TurningPointDetector::new();

        let first = swing(&mut detector, 0, 5.0).unwrap();
        assert_eq!(first.side, PeakSide::Right);
        assert_eq!(first.period, None);
        assert!(detector.has_right_peak());
        assert!(!detector.has_left_peak());

        // Swing back to port, then starboard again five seconds after the first peak
        detector.update(-5.0 * DEG, 1.0 * DEG, -2.0 * DEG, 2 * SECOND);
        let left = detector.update(5.0 * DEG, 5.0 * DEG, -5.0 * DEG, 4 * SECOND).unwrap();
        assert_eq!(left.side, PeakSide::Left);
        assert_eq!(left.period, None);

        let second = swing(&mut detector, 5 * SECOND, 5.0).unwrap();
        assert_eq!(second.side, PeakSide::Right);
        assert_eq!(second.period, Some(5.0));
        assert_eq!(second.peak_event().map(|e| e.period), Some(5.0));
    }

    #[test]
    fn small_amplitude_is_rejected() {
        let mut detector = TurningPointDetector::new();
        assert!(swing(&mut detector, 0, 0.8).is_none());
        assert!(!detector.has_right_peak());
        // The flip still happened
        assert_eq!(detector.direction(), MotionDirection::Negative);
    }

    #[test]
    fn acceleration_must_oppose_ending_motion() {
        let mut detector = TurningPointDetector::new();
        detector.update(5.0 * DEG, 0.0, 2.0 * DEG, 0);
        // Reversal with acceleration pushing the same way as the old motion
        assert!(detector.update(-5.0 * DEG, 3.0 * DEG, 4.0 * DEG, SECOND).is_none());

        let mut detector = TurningPointDetector::new();
        detector.update(5.0 * DEG, 0.0, 2.0 * DEG, 0);
        // Opposing but too weak
        assert!(detector.update(-5.0 * DEG, -1.5 * DEG, 4.0 * DEG, SECOND).is_none());
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut detector = TurningPointDetector::new();
        swing(&mut detector, 0, 5.0);
        detector.clear();

        assert_eq!(detector.direction(), MotionDirection::Idle);
        assert!(!detector.has_right_peak());
    }
}
