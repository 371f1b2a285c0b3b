//! Per-symbol subscriber registry for market-data and trade streams.
//!
//! Bounded channel, non-blocking producer via `try_send`, subscriber
//! eviction on overflow — an in-process fan-out, not a message-bus
//! publisher.

use crate::orderbook::events::{MarketDataEvent, TradeEvent};
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::warn;

type MarketDataSender = mpsc::Sender<MarketDataEvent>;
type TradeSender = mpsc::Sender<TradeEvent>;

/// Owns subscriber channels for every symbol. Independently synchronized
/// from the matching path: a `DashMap` gives per-symbol-bucket locking
/// rather than one global lock shared with book mutation, so subscribing
/// or publishing never contends with a book's own mutex.
#[derive(Default)]
pub struct Dissemination {
    market_data: DashMap<String, Vec<MarketDataSender>>,
    trades: DashMap<String, Vec<TradeSender>>,
    market_data_capacity: usize,
    trade_capacity: usize,
}

impl Dissemination {
    pub fn new(market_data_capacity: usize, trade_capacity: usize) -> Self {
        Self {
            market_data: DashMap::new(),
            trades: DashMap::new(),
            market_data_capacity,
            trade_capacity,
        }
    }

    /// Register a new market-data subscriber for `symbol`, returning the
    /// receiving half of its bounded queue.
    pub fn subscribe_market_data(&self, symbol: &str) -> mpsc::Receiver<MarketDataEvent> {
        let (tx, rx) = mpsc::channel(self.market_data_capacity.max(1));
        self.market_data.entry(symbol.to_string()).or_default().push(tx);
        rx
    }

    /// Register a new trade subscriber for `symbol`.
    pub fn subscribe_trades(&self, symbol: &str) -> mpsc::Receiver<TradeEvent> {
        let (tx, rx) = mpsc::channel(self.trade_capacity.max(1));
        self.trades.entry(symbol.to_string()).or_default().push(tx);
        rx
    }

    /// Push `event` to every market-data subscriber of its symbol. Never
    /// blocks: a subscriber whose queue is full is dropped rather than
    /// awaited.
    pub fn publish_market_data(&self, event: MarketDataEvent) {
        let symbol = event.symbol().to_string();
        let Some(mut senders) = self.market_data.get_mut(&symbol) else {
            return;
        };
        senders.retain(|tx| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(symbol = %symbol, "market-data subscriber evicted: queue full");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }

    /// Push `trade` to every trade subscriber of `symbol`, same
    /// non-blocking eviction policy as [`Self::publish_market_data`].
    pub fn publish_trade(&self, symbol: &str, trade: TradeEvent) {
        let Some(mut senders) = self.trades.get_mut(symbol) else {
            return;
        };
        senders.retain(|tx| match tx.try_send(trade.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(symbol = %symbol, "trade subscriber evicted: queue full");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }

    /// Close every subscriber channel on every symbol. Called from
    /// `MatchingEngine::shutdown`. Dropping the senders causes every
    /// subscriber's `recv` to return `None` on its next poll.
    pub fn shutdown(&self) {
        self.market_data.clear();
        self.trades.clear();
    }
}
