//! Monotonic time handling
//!
//! Sensor hardware stamps every sample with a monotonic nanosecond counter.
//! The engine never looks at wall-clock time; it only needs the signed gap
//! between two stamps, converted to seconds.

use crate::constants::NANOS_PER_SECOND;

/// Monotonic timestamp in nanoseconds (device boot or any fixed origin)
pub type Timestamp = u64;

/// Signed number of seconds from `earlier` to `later`.
///
/// Negative when the clock went backwards, zero for duplicate stamps.
pub fn seconds_between(earlier: Timestamp, later: Timestamp) -> f64 {
    if later >= earlier {
        (later - earlier) as f64 / NANOS_PER_SECOND
    } else {
        -((earlier - later) as f64 / NANOS_PER_SECOND)
    }
}

/// Convert seconds to a nanosecond offset, rounding to the nearest tick.
///
/// Negative or non-finite inputs map to zero.
pub fn nanos_from_seconds(seconds: f64) -> Timestamp {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    libm::round(seconds * NANOS_PER_SECOND) as Timestamp
}
