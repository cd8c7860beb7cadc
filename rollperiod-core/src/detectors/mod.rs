//! Period Detectors
//!
//! ## Overview
//!
//! Two independent detectors turn the per-tick estimates into period events.
//! They look at different features of the same oscillation, so they fail in
//! different ways and can be cross-checked by the user:
//!
//! | Detector        | Watches                     | Good at                        | Weak when                     |
//! |-----------------|-----------------------------|--------------------------------|-------------------------------|
//! | Turning point   | velocity sign, gated        | asymmetric rolls (per side)    | amplitude below 1°            |
//! | Zero crossing   | angle sign                  | small, clean oscillations      | the body has a standing list  |
//!
//! ## State Ownership
//!
//! Each detector owns only the few scalars it needs (last direction, last
//! peak or crossing timestamps). The engine keeps both inside its single
//! `EngineState` and calls them through `&mut`, so there is exactly one
//! writer per tick and reset clears everything in one place.

pub mod turning_point;
pub mod zero_crossing;

pub use turning_point::{MotionDirection, TurningPointDetector};
pub use zero_crossing::ZeroCrossingDetector;
