//! Error Types
//!
//! ## Design Philosophy
//!
//! The estimator deliberately has almost no error paths. A singular fit
//! matrix, an empty period history or a missing EMA are all *defined*
//! results (fallback velocity, `None`, saturated SNR) and are reported
//! through the snapshot, never through `Err`.
//!
//! What remains are caller contract violations that would otherwise hide
//! integration bugs:
//!
//! - Configuration values outside the supported option sets
//! - Angle sources that fail or run dry
//!
//! Errors follow the embedded conventions used throughout the crate: small,
//! `Copy`, no heap data, `&'static str` for text.

use core::fmt;

use thiserror_no_std::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Rejected configuration values
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Fit window must be 8, 16 or 32 samples
    #[error("Window size {value} not in {{8, 16, 32}}")]
    InvalidWindowSize {
        /// The rejected window length
        value: usize,
    },

    /// Tail average must span 5, 10 or 20 periods
    #[error("Average count {value} not in {{5, 10, 20}}")]
    InvalidAverageCount {
        /// The rejected count
        value: usize,
    },

    /// Sign flip must be +1 or -1
    #[error("Sign flip {value} not in {{+1, -1}}")]
    InvalidSignFlip {
        /// The rejected multiplier
        value: i8,
    },

    /// Period mode name not recognised
    #[error("Unknown period mode: {value}")]
    UnknownMode {
        /// Static description of what was expected
        value: &'static str,
    },
}

/// Failures reported by an angle or accelerometer source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError<E> {
    /// The source has no more samples and never will
    EndOfStream,

    /// The underlying device reported an error
    Device(E),
}

impl<E: fmt::Display> fmt::Display for SourceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfStream => write!(f, "End of stream"),
            Self::Device(e) => write!(f, "Sensor device error: {}", e),
        }
    }
}

impl<E> SourceError<E> {
    /// True when the source is simply exhausted
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SourceError::EndOfStream)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidWindowSize { value } =>
                defmt::write!(fmt, "Window size {} not supported", value),
            Self::InvalidAverageCount { value } =>
                defmt::write!(fmt, "Average count {} not supported", value),
            Self::InvalidSignFlip { value } =>
                defmt::write!(fmt, "Sign flip {} not supported", value),
            Self::UnknownMode { value } =>
                defmt::write!(fmt, "Unknown period mode: {}", value),
        }
    }
}
