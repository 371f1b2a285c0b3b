//! Engine-owned configuration knobs.
//!
//! Loading configuration from files, environment variables or a remote
//! config service is out of scope for this crate; this struct is the full
//! extent of what the core owns, constructed by the embedding application
//! and passed in at engine construction.

/// Tunables owned by the matching engine and dissemination layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Default depth returned by `get_book_snapshot` when the caller does
    /// not specify one.
    pub default_snapshot_depth: usize,
    /// Hard cap on snapshot depth regardless of what a caller requests.
    pub max_snapshot_depth: usize,
    /// Bounded queue capacity for each market-data subscriber.
    pub market_data_channel_capacity: usize,
    /// Bounded queue capacity for each trade-stream subscriber.
    pub trade_channel_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_snapshot_depth: 10,
            max_snapshot_depth: 50,
            market_data_channel_capacity: 1_024,
            trade_channel_capacity: 1_024,
        }
    }
}
