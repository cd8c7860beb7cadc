//! Constants for the roll period engine
//!
//! Every threshold the estimator compares against lives here, with the
//! units spelled out in the name. Angular thresholds are stored in radians
//! because the engine works in radians internally and only converts to
//! degrees when assembling a snapshot.
//!
//! ## Organization
//!
//! - **Detection**: deadbands and validation gates for turning points, fit
//!   degeneracy tolerances and SNR reporting limits
//! - **Buffers**: fixed capacities of the regression window and the period
//!   histories

/// Detection gates, fit tolerances and smoothing factors.
pub mod detection;

/// Fixed buffer capacities.
pub mod buffers;

pub use detection::{
    MIN_OMEGA_RAD_S, MIN_AMPLITUDE_RAD, MIN_ALPHA_RAD_S2,
    DETERMINANT_EPSILON, RESIDUAL_EPSILON, SNR_FLOOR, SNR_SATURATION_DB,
    EMA_BETA, MIN_FIT_POINTS, GRAVITY_LPF_ALPHA,
};

pub use buffers::{REGRESSION_CAPACITY, PERIOD_HISTORY_CAPACITY};

/// Nanoseconds per second, for converting monotonic timestamps.
pub const NANOS_PER_SECOND: f64 = 1e9;
