//! Buffer Sizes
//!
//! Both capacities are fixed at compile time so that the engine never
//! allocates after construction.

/// Capacity of the sliding regression buffer.
///
/// 64 samples cover about 1.3 s at 50 Hz, twice the largest selectable fit
/// window.
pub const REGRESSION_CAPACITY: usize = 64;

/// Capacity of each raw period history.
///
/// 50 periods is several minutes of rolling for typical vessels, far more
/// than the largest tail average (20) needs.
pub const PERIOD_HISTORY_CAPACITY: usize = 50;
