//! Streaming roll estimation for small vessels
//!
//! Turns a stream of timestamped roll angles into a live angle, angular
//! rate, angular acceleration and oscillation period, plus a quality figure
//! for the derivatives.
//!
//! Designed to sit directly behind a sensor callback:
//! - Constant work per sample, no heap allocation
//! - Runs without `std` (disable default features)
//! - Every undefined quantity is an explicit `None`
//!
//! ```rust
//! use rollperiod_core::RollEngine;
//!
//! let mut engine = RollEngine::new();
//!
//! // 50 Hz samples, angle in radians
//! for i in 0..100u64 {
//!     let t = i as f64 * 0.02;
//!     let snapshot = engine.process_sample(i * 20_000_000, 0.05 * (t * 1.05).sin());
//!     if let Some(period) = snapshot.period_right_s {
//!         println!("period {period:.1} s");
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod detectors;
pub mod engine;
pub mod errors;
pub mod events;
pub mod fit;
pub mod gravity;
pub mod smoother;
pub mod snapshot;
pub mod snr;
pub mod source;
pub mod time;

// Public API
pub use config::{AverageCount, EngineConfig, PeriodMode, SignFlip, WindowSize};
pub use engine::RollEngine;
pub use errors::{ConfigError, ConfigResult, SourceError};
pub use events::{PeakSide, ZeroDirection};
pub use snapshot::{EnginePhase, Snapshot};
pub use source::{AngleSource, Sample};
pub use time::Timestamp;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
