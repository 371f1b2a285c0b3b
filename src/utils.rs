//! Small shared helpers: wall-clock metadata and monotonic sequencing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// Exposed only as metadata on events and records; priority ordering never
/// relies on this (see [`Sequencer`]).
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// A per-book monotonic counter used to assign strictly increasing
/// admission timestamps.
///
/// Wall-clock timestamps can collide at sub-millisecond submission rates;
/// an internal sequence counter cannot.
#[derive(Debug, Default)]
pub struct Sequencer(AtomicU64);

impl Sequencer {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Returns the next value in strictly increasing order.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequencer_is_strictly_increasing() {
        let seq = Sequencer::new();
        let a = seq.next();
        let b = seq.next();
        let c = seq.next();
        assert!(a < b);
        assert!(b < c);
    }
}
