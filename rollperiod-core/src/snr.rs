//! Signal-to-noise estimate of the current fit
//!
//! The window RMS stands in for signal power and the fit residual RMS for
//! noise power. A perfect fit has no measurable noise, so the decibel value
//! saturates at [`SNR_SATURATION_DB`] instead of reporting infinity.

use crate::{
    constants::{RESIDUAL_EPSILON, SNR_FLOOR, SNR_SATURATION_DB},
    fit::FitResult,
};

/// Linear and logarithmic SNR of one fit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnrReading {
    /// amplitude_rms / residual_rms, `+∞` for a noiseless window
    pub ratio: f64,
    /// 20·log10(ratio), or the saturation sentinel
    pub db: f64,
}

impl SnrReading {
    /// Compute the SNR from the window and residual RMS.
    pub fn from_rms(amplitude_rms: f64, residual_rms: f64) -> Self {
        let ratio = if residual_rms <= RESIDUAL_EPSILON {
            f64::INFINITY
        } else {
            amplitude_rms / residual_rms
        };

        let db = if ratio.is_infinite() {
            SNR_SATURATION_DB
        } else {
            20.0 * libm::log10(ratio.max(SNR_FLOOR))
        };

        Self { ratio, db }
    }

    /// SNR of a fit result
    pub fn from_fit(fit: &FitResult) -> Self {
        Self::from_rms(fit.amplitude_rms, fit.residual_rms)
    }

    /// True when `db` is the saturation sentinel rather than a measurement
    pub fn is_saturated(&self) -> bool {
        self.ratio.is_infinite()
    }
}
