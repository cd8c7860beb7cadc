//! Detection Gates and Numerical Tolerances
//!
//! The turning-point detector only trusts a reversal when the body has
//! actually swung somewhere and is visibly decelerating. These values were
//! tuned against a phone lying on a chart table, sampled at roughly 50 Hz.

/// Angular velocity deadband (rad/s), 0.2°/s.
///
/// Fitted velocities smaller than this are treated as "not moving" and the
/// previous direction of motion is kept.
pub const MIN_OMEGA_RAD_S: f64 = 0.2 * core::f64::consts::PI / 180.0;

/// Amplitude gate (rad), 1°.
///
/// A reversal closer to level than this is considered noise.
pub const MIN_AMPLITUDE_RAD: f64 = 1.0 * core::f64::consts::PI / 180.0;

/// Deceleration gate (rad/s²), 2°/s².
///
/// The fitted acceleration at a reversal must be at least this large and
/// must oppose the motion that just ended.
pub const MIN_ALPHA_RAD_S2: f64 = 2.0 * core::f64::consts::PI / 180.0;

/// Normal-equation determinants at or below this magnitude are singular.
pub const DETERMINANT_EPSILON: f64 = 1e-12;

/// Residual RMS at or below this is treated as a noiseless fit.
pub const RESIDUAL_EPSILON: f64 = 1e-9;

/// Lower clamp applied to the linear SNR before taking the logarithm.
pub const SNR_FLOOR: f64 = 1e-9;

/// Reported SNR when the fit residual vanishes.
///
/// This is a saturation sentinel, not a measured value.
pub const SNR_SATURATION_DB: f64 = 99.0;

/// Blend factor of the period EMAs.
pub const EMA_BETA: f64 = 0.2;

/// Smallest active window the quadratic fit runs on.
pub const MIN_FIT_POINTS: usize = 5;

/// Weight of the previous gravity estimate in the accelerometer low-pass.
pub const GRAVITY_LPF_ALPHA: f32 = 0.9;
