//! Roll angle from a raw accelerometer
//!
//! ## Overview
//!
//! Hosts without a fused orientation sensor can still feed the engine. The
//! gravity vector is isolated from the raw accelerometer with a first-order
//! low-pass filter and roll is read off its direction:
//!
//! ```text
//! g ← α·g + (1 − α)·a        α = 0.9, seeded with the first reading
//!
//! roll = atan2(gx, √(gy² + gz²))
//! ```
//!
//! The axis convention is that of a phone held upright in portrait: `x`
//! points to the right edge, so leaning the top of the device to starboard
//! gives a positive roll.
//!
//! The filter lags by a few samples at 50 Hz, far below typical roll periods
//! of several seconds, and removes most of the hull vibration.
//!
//! ## Wiring
//!
//! [`GravityRollSource`] wraps any [`AccelerationSource`] and exposes it as
//! an [`AngleSource`], so it plugs straight into
//! [`RollEngine::drain`](crate::engine::RollEngine::drain).

use crate::{
    constants::GRAVITY_LPF_ALPHA,
    errors::SourceError,
    source::{AngleSource, MemorySource, Sample},
    time::Timestamp,
};

/// One accelerometer reading in the device frame (m/s²)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelSample {
    /// Monotonic timestamp (ns)
    pub timestamp: Timestamp,
    /// `[x, y, z]` acceleration
    pub acceleration: [f32; 3],
}

/// Non-blocking producer of accelerometer readings
pub trait AccelerationSource {
    /// Device-specific error
    type Error;

    /// Attempt to pull the next reading
    fn poll_acceleration(&mut self) -> nb::Result<AccelSample, SourceError<Self::Error>>;
}

impl AccelerationSource for MemorySource<'_, AccelSample> {
    type Error = ();

    fn poll_acceleration(&mut self) -> nb::Result<AccelSample, SourceError<()>> {
        self.next_item()
    }
}

/// Low-pass gravity estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityFilter {
    gravity: Option<[f32; 3]>,
    alpha: f32,
}

impl GravityFilter {
    /// Filter with the default smoothing factor
    pub const fn new() -> Self {
        Self::with_alpha(GRAVITY_LPF_ALPHA)
    }

    /// Filter keeping `alpha` of the previous estimate on every update
    pub const fn with_alpha(alpha: f32) -> Self {
        Self { gravity: None, alpha }
    }

    /// Blend in a raw reading and return the new estimate
    pub fn update(&mut self, raw: [f32; 3]) -> [f32; 3] {
        let next = match self.gravity {
            None => raw,
            Some(g) => {
                let mut out = [0.0; 3];
                for ((o, g), r) in out.iter_mut().zip(g).zip(raw) {
                    *o = self.alpha * g + (1.0 - self.alpha) * r;
                }
                out
            }
        };
        self.gravity = Some(next);
        next
    }

    /// Current estimate, `None` before the first reading
    pub fn gravity(&self) -> Option<[f32; 3]> {
        self.gravity
    }

    /// Roll of the current estimate (rad)
    pub fn roll(&self) -> Option<f64> {
        self.gravity.map(roll_from_gravity)
    }

    /// Forget the estimate
    pub fn clear(&mut self) {
        self.gravity = None;
    }
}

impl Default for GravityFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Roll angle (rad) of a gravity vector
pub fn roll_from_gravity(g: [f32; 3]) -> f64 {
    let [gx, gy, gz] = g;
    libm::atan2f(gx, libm::sqrtf(gy * gy + gz * gz)) as f64
}

/// [`AngleSource`] computing roll from an accelerometer
#[derive(Debug, Clone)]
pub struct GravityRollSource<A> {
    accelerometer: A,
    filter: GravityFilter,
}

impl<A: AccelerationSource> GravityRollSource<A> {
    /// Wrap an accelerometer with the default filter
    pub fn new(accelerometer: A) -> Self {
        Self::with_filter(accelerometer, GravityFilter::new())
    }

    /// Wrap an accelerometer with a custom filter
    pub fn with_filter(accelerometer: A, filter: GravityFilter) -> Self {
        Self { accelerometer, filter }
    }

    /// Current filter state
    pub fn filter(&self) -> &GravityFilter {
        &self.filter
    }

    /// Give the accelerometer back
    pub fn into_inner(self) -> A {
        self.accelerometer
    }
}

impl<A: AccelerationSource> AngleSource for GravityRollSource<A> {
    type Error = A::Error;

    fn poll_sample(&mut self) -> nb::Result<Sample, SourceError<A::Error>> {
        let reading = self.accelerometer.poll_acceleration()?;
        let gravity = self.filter.update(reading.acceleration);
        Ok(Sample {
            timestamp: reading.timestamp,
            angle: roll_from_gravity(gravity),
        })
    }
}
