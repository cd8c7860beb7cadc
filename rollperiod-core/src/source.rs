//! Pull-based sample sources
//!
//! The engine does not own a sensor. Hosts either push samples through
//! [`RollEngine::process_sample`](crate::engine::RollEngine::process_sample)
//! or hand it something implementing [`AngleSource`] and call
//! [`RollEngine::drain`](crate::engine::RollEngine::drain).
//!
//! Sources use the `nb` two-level error model:
//!
//! - `nb::Error::WouldBlock`: nothing ready, try again on the next wake-up
//! - `nb::Error::Other(SourceError::EndOfStream)`: exhausted for good
//! - `nb::Error::Other(SourceError::Device(e))`: the hardware failed
//!
//! ```rust
//! use rollperiod_core::source::{AngleSource, MemorySource, Sample};
//!
//! let samples = [
//!     Sample { timestamp: 0, angle: 0.01 },
//!     Sample { timestamp: 20_000_000, angle: 0.02 },
//! ];
//! let mut source = MemorySource::new(&samples);
//!
//! assert_eq!(source.poll_sample().ok(), Some(samples[0]));
//! assert_eq!(source.remaining(), 1);
//! ```

use crate::{errors::SourceError, time::Timestamp};

/// One roll angle reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Monotonic timestamp (ns)
    pub timestamp: Timestamp,
    /// Roll angle (rad), before any sign flip
    pub angle: f64,
}

/// Non-blocking producer of roll angle samples
pub trait AngleSource {
    /// Device-specific error
    type Error;

    /// Attempt to pull the next sample
    fn poll_sample(&mut self) -> nb::Result<Sample, SourceError<Self::Error>>;
}

/// Replays a slice of recorded items
///
/// Works for anything `Copy`; [`Sample`] slices act as an [`AngleSource`]
/// and [`AccelSample`](crate::gravity::AccelSample) slices as an
/// [`AccelerationSource`](crate::gravity::AccelerationSource).
#[derive(Debug, Clone)]
pub struct MemorySource<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T: Copy> MemorySource<'a, T> {
    /// Replay `items` from the start
    pub fn new(items: &'a [T]) -> Self {
        Self { items, position: 0 }
    }

    /// Rewind to the first item
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Items not yet pulled
    pub fn remaining(&self) -> usize {
        self.items.len() - self.position
    }

    /// True once every item has been pulled
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.items.len()
    }

    pub(crate) fn next_item(&mut self) -> nb::Result<T, SourceError<()>> {
        let item = self
            .items
            .get(self.position)
            .copied()
            .ok_or(nb::Error::Other(SourceError::EndOfStream))?;
        self.position += 1;
        Ok(item)
    }
}

impl AngleSource for MemorySource<'_, Sample> {
    type Error = ();

    fn poll_sample(&mut self) -> nb::Result<Sample, SourceError<()>> {
        self.next_item()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_then_ends() {
        let samples = [
            Sample { timestamp: 1, angle: 0.1 },
            Sample { timestamp: 2, angle: 0.2 },
        ];
        let mut source = MemorySource::new(&samples);

        assert_eq!(source.poll_sample().ok(), Some(samples[0]));
        assert_eq!(source.poll_sample().ok(), Some(samples[1]));
        assert!(source.is_exhausted());

        // End of stream is sticky
        for _ in 0..2 {
            assert!(matches!(
                source.poll_sample(),
                Err(nb::Error::Other(SourceError::EndOfStream))
            ));
        }
    }

    #[test]
    fn rewind_restarts() {
        let samples = [Sample { timestamp: 1, angle: 0.1 }];
        let mut source = MemorySource::new(&samples);
        let _ = source.poll_sample();
        assert_eq!(source.remaining(), 0);

        source.rewind();
        assert_eq!(source.remaining(), 1);
    }
}
