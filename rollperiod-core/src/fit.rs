//! Quadratic Fit Estimator
//!
//! ## Overview
//!
//! Differentiating a noisy angle signal sample-to-sample amplifies the noise
//! by `1/dt`. Instead, the estimator fits a parabola through the active
//! window by ordinary least squares and reads the derivatives off its
//! coefficients at `t = 0` (the newest sample):
//!
//! ```text
//! θ(t) = a·t² + b·t + c
//!
//! angle        = c
//! velocity     = -b     (rad/s, forward time)
//! acceleration = 2a     (rad/s²)
//! ```
//!
//! Ages grow into the past, so a body rolling to starboard *now* has angles
//! that were smaller at larger `t` and a negative `b`. The reported velocity
//! is the forward-time rate `-b`; the curvature term is unaffected by the
//! direction of the time axis.
//!
//! ## Normal Equations
//!
//! With power sums `Sₖ = Σ tᵢᵏ` and moments `Tₖ = Σ tᵢᵏ θᵢ`:
//!
//! ```text
//! ┌ S0 S1 S2 ┐ ┌ c ┐   ┌ T0 ┐
//! │ S1 S2 S3 │ │ b │ = │ T1 │
//! └ S2 S3 S4 ┘ └ a ┘   └ T2 ┘
//! ```
//!
//! The system is solved with Cramer's rule; for a 3×3 matrix that is cheaper
//! than a factorisation and needs no workspace.
//!
//! ## Degenerate Windows
//!
//! When `|det| ≤ 1e-12` (e.g. coincident timestamps) the parabola is not
//! identifiable. The estimator then falls back to a two-point difference and
//! returns [`FitOutcome::Fallback`] so callers can tell the two apart.

use crate::{
    buffer::RegressionPoint,
    constants::{DETERMINANT_EPSILON, MIN_FIT_POINTS, MIN_OMEGA_RAD_S},
};

/// Derivatives and quality metrics of one fit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitResult {
    /// Fitted angle at the newest sample (rad)
    pub angle: f64,
    /// Angular velocity in forward time (rad/s)
    pub velocity: f64,
    /// Angular acceleration (rad/s²)
    pub acceleration: f64,
    /// RMS of the fit residuals (rad)
    pub residual_rms: f64,
    /// RMS of the window angles (rad)
    pub amplitude_rms: f64,
}

/// Result of fitting one window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitOutcome {
    /// Least-squares parabola through the window
    Fit(FitResult),
    /// Two-point difference used because the window was singular
    Fallback(FitResult),
}

impl FitOutcome {
    /// The numbers, regardless of how they were obtained
    pub fn result(&self) -> &FitResult {
        match self {
            FitOutcome::Fit(result) | FitOutcome::Fallback(result) => result,
        }
    }

    /// True when the window was singular
    pub fn is_fallback(&self) -> bool {
        matches!(self, FitOutcome::Fallback(_))
    }
}

/// Determinant of a 3×3 matrix given row by row
fn det3(m: [[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Replace column `col` of `m` with `rhs`
fn with_column(mut m: [[f64; 3]; 3], col: usize, rhs: [f64; 3]) -> [[f64; 3]; 3] {
    for (row, value) in m.iter_mut().zip(rhs) {
        row[col] = value;
    }
    m
}

/// Fit the active window.
///
/// `window` is newest-first as returned by
/// [`active_window`](crate::buffer::RegressionBuffer::active_window); `dt`
/// is the gap between the two newest samples and only matters for the
/// fallback difference. Returns `None` while the window holds fewer than
/// five samples.
pub fn fit_window(window: &[RegressionPoint], dt: f64) -> Option<FitOutcome> {
    let m = window.len();
    if m < MIN_FIT_POINTS {
        return None;
    }

    let (mut s0, mut s1, mut s2, mut s3, mut s4) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut t0, mut t1, mut t2) = (0.0, 0.0, 0.0);
    for p in window {
        let t = p.t;
        let tt = t * t;
        s0 += 1.0;
        s1 += t;
        s2 += tt;
        s3 += tt * t;
        s4 += tt * tt;
        t0 += p.angle;
        t1 += t * p.angle;
        t2 += tt * p.angle;
    }

    let normal = [[s0, s1, s2], [s1, s2, s3], [s2, s3, s4]];
    let rhs = [t0, t1, t2];
    let det = det3(normal);

    if libm::fabs(det) <= DETERMINANT_EPSILON {
        return Some(FitOutcome::Fallback(fallback(window, dt)));
    }

    let c = det3(with_column(normal, 0, rhs)) / det;
    let b = det3(with_column(normal, 1, rhs)) / det;
    let a = det3(with_column(normal, 2, rhs)) / det;

    let mut rss = 0.0;
    let mut sum_sq = 0.0;
    for p in window {
        let fitted = a * p.t * p.t + b * p.t + c;
        let e = p.angle - fitted;
        rss += e * e;
        sum_sq += p.angle * p.angle;
    }

    let n = m as f64;
    Some(FitOutcome::Fit(FitResult {
        angle: c,
        // t counts backwards from now, so dθ/d(time) = -dθ/dt
        velocity: -b,
        acceleration: 2.0 * a,
        residual_rms: libm::sqrt(rss / n),
        amplitude_rms: libm::sqrt(sum_sq / n),
    }))
}

/// Two-point difference for singular windows
fn fallback(window: &[RegressionPoint], dt: f64) -> FitResult {
    let now = window[0].angle;
    let prev = window.get(1).map_or(now, |p| p.angle);

    let raw = if dt > 0.0 { (now - prev) / dt } else { 0.0 };
    let velocity = if libm::fabs(raw) < MIN_OMEGA_RAD_S { 0.0 } else { raw };

    FitResult {
        angle: now,
        velocity,
        acceleration: 0.0,
        residual_rms: 0.0,
        amplitude_rms: libm::fabs(now),
    }
}
