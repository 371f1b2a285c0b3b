//! Market-data and trade event envelopes pushed to the dissemination
//! layer: a single tagged enum suitable as an in-process channel payload.

use crate::orderbook::book::LevelSummary;
use crate::orderbook::trade::TradeExecution;
use crate::types::OrderStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message carried on a symbol's market-data channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MarketDataEvent {
    /// Sent once, immediately on subscribe: full depth up to the
    /// configured cap.
    Snapshot {
        symbol: String,
        bids: Vec<LevelSummary>,
        asks: Vec<LevelSummary>,
        timestamp: u64,
    },
    /// Current top-of-book or level delta after a mutation.
    BookUpdate {
        symbol: String,
        bids: Vec<LevelSummary>,
        asks: Vec<LevelSummary>,
        timestamp: u64,
    },
    /// Best bid/ask after a mutation that changed either.
    BboUpdate {
        symbol: String,
        best_bid: Option<LevelSummary>,
        best_ask: Option<LevelSummary>,
        timestamp: u64,
    },
    /// An order's terminal or admission-rejection lifecycle transition.
    Lifecycle {
        symbol: String,
        order_id: Uuid,
        status: OrderStatus,
        timestamp: u64,
    },
}

impl MarketDataEvent {
    pub fn symbol(&self) -> &str {
        match self {
            MarketDataEvent::Snapshot { symbol, .. }
            | MarketDataEvent::BookUpdate { symbol, .. }
            | MarketDataEvent::BboUpdate { symbol, .. }
            | MarketDataEvent::Lifecycle { symbol, .. } => symbol,
        }
    }
}

/// Message carried on a symbol's trade channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeEvent {
    pub symbol: String,
    pub trade: TradeExecution,
}
