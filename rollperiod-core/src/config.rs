//! Engine Configuration
//!
//! ## Overview
//!
//! The engine has four user-facing settings, each with a small closed set of
//! values:
//!
//! | Setting       | Values              | Default | Effect                          |
//! |---------------|---------------------|---------|---------------------------------|
//! | window size   | 8, 16, 32 samples   | 32      | samples in the quadratic fit    |
//! | average count | 5, 10, 20 periods   | 10      | length of the tail average      |
//! | sign flip     | +1, -1              | +1      | multiplies every incoming angle |
//! | mode          | Peaks, Zero×2       | Peaks   | history behind the tail average |
//!
//! Each setting is an enum, so an [`EngineConfig`] can never hold an
//! unsupported value. Raw values coming from a UI, a preferences file or an
//! FFI boundary go through `TryFrom`/`FromStr` and are rejected with a
//! [`ConfigError`] instead of being clamped.
//!
//! ## Cycling
//!
//! Small displays usually expose one button per setting that steps through
//! the options. `next()`, `toggle()` and `flipped()` implement that stepping
//! so hosts don't need to keep their own option tables.
//!
//! ```rust
//! use rollperiod_core::config::{EngineConfig, WindowSize, PeriodMode};
//!
//! let config = EngineConfig::default()
//!     .with_window_size(WindowSize::Sixteen)
//!     .with_mode(PeriodMode::ZeroCrossDoubled);
//!
//! assert_eq!(config.window_size.get(), 16);
//! assert_eq!(config.window_size.next(), WindowSize::ThirtyTwo);
//! ```

use core::str::FromStr;

use crate::errors::{ConfigError, ConfigResult};

/// Number of samples used by the quadratic fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindowSize {
    /// 8 samples: fastest response, noisiest derivatives
    Eight,
    /// 16 samples
    Sixteen,
    /// 32 samples: smoothest derivatives
    #[default]
    ThirtyTwo,
}

impl WindowSize {
    /// All options in cycling order
    pub const ALL: [WindowSize; 3] = [WindowSize::Eight, WindowSize::Sixteen, WindowSize::ThirtyTwo];

    /// Window length in samples
    pub const fn get(&self) -> usize {
        match self {
            WindowSize::Eight => 8,
            WindowSize::Sixteen => 16,
            WindowSize::ThirtyTwo => 32,
        }
    }

    /// Next option, wrapping around
    pub const fn next(&self) -> Self {
        match self {
            WindowSize::Eight => WindowSize::Sixteen,
            WindowSize::Sixteen => WindowSize::ThirtyTwo,
            WindowSize::ThirtyTwo => WindowSize::Eight,
        }
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = ConfigError;

    fn try_from(value: usize) -> ConfigResult<Self> {
        match value {
            8 => Ok(WindowSize::Eight),
            16 => Ok(WindowSize::Sixteen),
            32 => Ok(WindowSize::ThirtyTwo),
            _ => Err(ConfigError::InvalidWindowSize { value }),
        }
    }
}

/// Number of recent periods in the tail average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AverageCount {
    /// Last 5 periods
    Five,
    /// Last 10 periods
    #[default]
    Ten,
    /// Last 20 periods
    Twenty,
}

impl AverageCount {
    /// All options in cycling order
    pub const ALL: [AverageCount; 3] = [AverageCount::Five, AverageCount::Ten, AverageCount::Twenty];

    /// Number of periods averaged
    pub const fn get(&self) -> usize {
        match self {
            AverageCount::Five => 5,
            AverageCount::Ten => 10,
            AverageCount::Twenty => 20,
        }
    }

    /// Next option, wrapping around
    pub const fn next(&self) -> Self {
        match self {
            AverageCount::Five => AverageCount::Ten,
            AverageCount::Ten => AverageCount::Twenty,
            AverageCount::Twenty => AverageCount::Five,
        }
    }
}

impl TryFrom<usize> for AverageCount {
    type Error = ConfigError;

    fn try_from(value: usize) -> ConfigResult<Self> {
        match value {
            5 => Ok(AverageCount::Five),
            10 => Ok(AverageCount::Ten),
            20 => Ok(AverageCount::Twenty),
            _ => Err(ConfigError::InvalidAverageCount { value }),
        }
    }
}

/// Sign convention applied to incoming angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignFlip {
    /// Angles used as delivered
    #[default]
    Normal,
    /// Angles negated (device mounted the other way round)
    Inverted,
}

impl SignFlip {
    /// Multiplier applied to each angle
    pub const fn factor(&self) -> f64 {
        match self {
            SignFlip::Normal => 1.0,
            SignFlip::Inverted => -1.0,
        }
    }

    /// The opposite convention
    pub const fn flipped(&self) -> Self {
        match self {
            SignFlip::Normal => SignFlip::Inverted,
            SignFlip::Inverted => SignFlip::Normal,
        }
    }
}

impl TryFrom<i8> for SignFlip {
    type Error = ConfigError;

    fn try_from(value: i8) -> ConfigResult<Self> {
        match value {
            1 => Ok(SignFlip::Normal),
            -1 => Ok(SignFlip::Inverted),
            _ => Err(ConfigError::InvalidSignFlip { value }),
        }
    }
}

/// Which period history drives the tail average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeriodMode {
    /// Periods between validated turning points
    #[default]
    Peaks,
    /// Doubled zero-crossing intervals
    ZeroCrossDoubled,
}

impl PeriodMode {
    /// Short label for displays
    pub const fn label(&self) -> &'static str {
        match self {
            PeriodMode::Peaks => "Peaks",
            PeriodMode::ZeroCrossDoubled => "Zero×2",
        }
    }

    /// The other mode
    pub const fn toggle(&self) -> Self {
        match self {
            PeriodMode::Peaks => PeriodMode::ZeroCrossDoubled,
            PeriodMode::ZeroCrossDoubled => PeriodMode::Peaks,
        }
    }
}

impl FromStr for PeriodMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "peaks" | "Peaks" => Ok(PeriodMode::Peaks),
            "zero2" | "zero-cross-doubled" | "Zero×2" => Ok(PeriodMode::ZeroCrossDoubled),
            _ => Err(ConfigError::UnknownMode {
                value: "expected peaks or zero2",
            }),
        }
    }
}

/// Complete engine configuration
///
/// Read once at the start of every tick; changing it never rewrites history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Samples in the quadratic fit
    pub window_size: WindowSize,
    /// Periods in the tail average
    pub average_count: AverageCount,
    /// Sign applied to incoming angles
    pub sign_flip: SignFlip,
    /// History behind the tail average
    pub mode: PeriodMode,
}

impl EngineConfig {
    /// Validate raw values from an untyped boundary
    pub fn from_raw(
        window_size: usize,
        average_count: usize,
        sign_flip: i8,
        mode: PeriodMode,
    ) -> ConfigResult<Self> {
        Ok(Self {
            window_size: WindowSize::try_from(window_size)?,
            average_count: AverageCount::try_from(average_count)?,
            sign_flip: SignFlip::try_from(sign_flip)?,
            mode,
        })
    }

    /// Set the fit window
    pub fn with_window_size(mut self, window_size: WindowSize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the tail average length
    pub fn with_average_count(mut self, average_count: AverageCount) -> Self {
        self.average_count = average_count;
        self
    }

    /// Set the sign convention
    pub fn with_sign_flip(mut self, sign_flip: SignFlip) -> Self {
        self.sign_flip = sign_flip;
        self
    }

    /// Set the period mode
    pub fn with_mode(mut self, mode: PeriodMode) -> Self {
        self.mode = mode;
        self
    }
}
