//! The matching engine: owns every symbol's order book, serializes
//! mutating operations per symbol, and drives the dissemination layer.

use crate::config::EngineConfig;
use crate::decimal::Decimal;
use crate::dissemination::Dissemination;
use crate::error::EngineError;
use crate::order::{Order, OrderRequest};
use crate::orderbook::book::{LevelSummary, OrderBook};
use crate::orderbook::events::{MarketDataEvent, TradeEvent};
use crate::orderbook::fees::FeeSchedule;
use crate::orderbook::matching::match_order;
use crate::types::{OrderStatus, Side};
use crate::utils::{current_time_millis, Sequencer};
use dashmap::DashMap;
use std::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// Output of a successful `submit`.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub filled_quantity: Decimal,
    pub remaining_quantity: Decimal,
}

impl From<&Order> for SubmitOutcome {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id,
            status: order.status,
            filled_quantity: order.filled_quantity,
            remaining_quantity: order.remaining_quantity(),
        }
    }
}

/// Output of a successful `get_book_snapshot`.
#[derive(Debug, Clone)]
pub struct BookSnapshot {
    pub symbol: String,
    pub bids: Vec<LevelSummary>,
    pub asks: Vec<LevelSummary>,
    pub timestamp: u64,
}

/// Output of a successful `get_bbo`.
#[derive(Debug, Clone)]
pub struct Bbo {
    pub symbol: String,
    pub best_bid: Option<LevelSummary>,
    pub best_ask: Option<LevelSummary>,
    pub timestamp: u64,
}

struct BookEntry {
    book: Mutex<OrderBook>,
    sequencer: Sequencer,
}

impl BookEntry {
    fn new(symbol: &str) -> Self {
        Self {
            book: Mutex::new(OrderBook::new(symbol)),
            sequencer: Sequencer::new(),
        }
    }
}

/// Owns all [`OrderBook`]s, keyed by symbol, each guarded by its own
/// `Mutex` — a per-symbol exclusive section serializing every mutating
/// operation into a strict total order. Symbols are otherwise
/// unrestricted: concurrent callers on different symbols never contend.
pub struct MatchingEngine {
    books: DashMap<String, BookEntry>,
    /// Resolves a currently-resting order's symbol without the caller
    /// having to supply one on `cancel`/`get_order`.
    resting_locations: DashMap<Uuid, String>,
    /// Final record of an order once it leaves the resting structure
    /// (filled, cancelled, or matched away), so `get_order` keeps working
    /// after that point.
    terminal_orders: DashMap<Uuid, Order>,
    dissemination: Dissemination,
    config: EngineConfig,
    fee_schedule: Option<FeeSchedule>,
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Self {
        let dissemination = Dissemination::new(
            config.market_data_channel_capacity,
            config.trade_channel_capacity,
        );
        Self {
            books: DashMap::new(),
            resting_locations: DashMap::new(),
            terminal_orders: DashMap::new(),
            dissemination,
            config,
            fee_schedule: None,
        }
    }

    pub fn with_fee_schedule(mut self, fee_schedule: FeeSchedule) -> Self {
        self.fee_schedule = Some(fee_schedule);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn dissemination(&self) -> &Dissemination {
        &self.dissemination
    }

    /// Admit and dispatch an order.
    ///
    /// Validation happens before the symbol's exclusive section is
    /// entered: a `ValidationError` produces no book mutation and no
    /// queryable record — only a rejection lifecycle event on the
    /// symbol's market-data channel, carrying a fresh id assigned solely
    /// for that event.
    pub fn submit(&self, request: OrderRequest) -> Result<SubmitOutcome, EngineError> {
        if let Err(err) = request.validate(crate::decimal::MAX_SCALE) {
            let mut rejected = Order::new(Uuid::new_v4(), &request, current_time_millis());
            rejected.reject();
            self.emit_lifecycle(&request.symbol, &rejected);
            return Err(err);
        }

        let order_id = Uuid::new_v4();
        let entry = self
            .books
            .entry(request.symbol.clone())
            .or_insert_with(|| BookEntry::new(&request.symbol));

        let (outcome, bbo_changed) = {
            let mut book = entry.book.lock().expect("book mutex poisoned");
            let timestamp = entry.sequencer.next();
            let order = Order::new(order_id, &request, timestamp);
            let best_before = (book.best_bid(), book.best_ask());

            let outcome = match_order(&mut book, order, &entry.sequencer);

            if outcome.taker.status.is_resting() {
                self.resting_locations.insert(order_id, request.symbol.clone());
            }
            for maker in &outcome.filled_makers {
                self.resting_locations.remove(&maker.order_id);
                self.terminal_orders.insert(maker.order_id, maker.clone());
            }
            if outcome.taker.status.is_terminal() {
                self.terminal_orders
                    .insert(outcome.taker.order_id, outcome.taker.clone());
            }

            let bbo_changed = best_before != (book.best_bid(), book.best_ask());
            (outcome, bbo_changed)
        };

        info!(
            symbol = %request.symbol,
            order_id = %order_id,
            status = %outcome.taker.status,
            trades = outcome.trades.len(),
            "order submitted"
        );

        self.apply_fee_hook(&outcome.trades);
        self.emit_post_operation(&request.symbol, &entry, &outcome.trades, bbo_changed);
        for maker in &outcome.filled_makers {
            self.emit_lifecycle(&request.symbol, maker);
        }
        if outcome.taker.status.is_terminal() {
            self.emit_lifecycle(&request.symbol, &outcome.taker);
        }

        Ok(SubmitOutcome::from(&outcome.taker))
    }

    /// Cancel a resting order.
    pub fn cancel(&self, order_id: Uuid) -> Result<SubmitOutcome, EngineError> {
        let Some((_, symbol)) = self.resting_locations.remove(&order_id) else {
            if let Some(terminal) = self.terminal_orders.get(&order_id) {
                return Err(EngineError::InvalidState {
                    order_id,
                    status: terminal.status,
                    attempted: "cancel",
                });
            }
            return Err(EngineError::NotFound { order_id });
        };

        let Some(entry) = self.books.get(&symbol) else {
            return Err(EngineError::Internal {
                context: format!("resting_locations pointed at unknown symbol {symbol}"),
            });
        };

        let (mut order, bbo_changed) = {
            let mut book = entry.book.lock().expect("book mutex poisoned");
            let best_before = (book.best_bid(), book.best_ask());
            let order = book.cancel(order_id)?;
            let bbo_changed = best_before != (book.best_bid(), book.best_ask());
            (order, bbo_changed)
        };
        order.cancel_remainder();
        self.terminal_orders.insert(order_id, order.clone());

        info!(symbol = %symbol, order_id = %order_id, "order cancelled");

        self.emit_post_operation(&symbol, &entry, &[], bbo_changed);
        self.emit_lifecycle(&symbol, &order);

        Ok(SubmitOutcome::from(&order))
    }

    /// Current recorded state of any order this engine has ever admitted.
    pub fn get_order(&self, order_id: Uuid) -> Result<Order, EngineError> {
        if let Some(symbol) = self.resting_locations.get(&order_id) {
            if let Some(entry) = self.books.get(symbol.as_str()) {
                let book = entry.book.lock().expect("book mutex poisoned");
                if let Some(order) = book.get(order_id) {
                    return Ok(order.clone());
                }
            }
        }
        self.terminal_orders
            .get(&order_id)
            .map(|r| r.clone())
            .ok_or(EngineError::NotFound { order_id })
    }

    /// A consistent depth snapshot taken inside the symbol's exclusive
    /// section.
    pub fn get_book_snapshot(&self, symbol: &str, depth: usize) -> BookSnapshot {
        let depth = depth.clamp(1, self.config.max_snapshot_depth);
        match self.books.get(symbol) {
            Some(entry) => {
                let book = entry.book.lock().expect("book mutex poisoned");
                let (bids, asks) = book.snapshot(depth);
                BookSnapshot {
                    symbol: symbol.to_string(),
                    bids,
                    asks,
                    timestamp: current_time_millis(),
                }
            }
            None => BookSnapshot {
                symbol: symbol.to_string(),
                bids: Vec::new(),
                asks: Vec::new(),
                timestamp: current_time_millis(),
            },
        }
    }

    /// Current best bid/ask.
    pub fn get_bbo(&self, symbol: &str) -> Bbo {
        match self.books.get(symbol) {
            Some(entry) => {
                let book = entry.book.lock().expect("book mutex poisoned");
                Bbo {
                    symbol: symbol.to_string(),
                    best_bid: book.best_bid_level().map(|l| LevelSummary {
                        price: l.price,
                        quantity: l.total_quantity(),
                        order_count: l.order_count(),
                    }),
                    best_ask: book.best_ask_level().map(|l| LevelSummary {
                        price: l.price,
                        quantity: l.total_quantity(),
                        order_count: l.order_count(),
                    }),
                    timestamp: current_time_millis(),
                }
            }
            None => Bbo {
                symbol: symbol.to_string(),
                best_bid: None,
                best_ask: None,
                timestamp: current_time_millis(),
            },
        }
    }

    /// Subscribe to `symbol`'s market-data channel; an initial `Snapshot`
    /// is sent immediately, followed by `BookUpdate`/`BboUpdate` messages
    /// as the book changes.
    pub fn subscribe_market_data(&self, symbol: &str) -> tokio::sync::mpsc::Receiver<MarketDataEvent> {
        let rx = self.dissemination.subscribe_market_data(symbol);
        let snapshot = self.get_book_snapshot(symbol, self.config.default_snapshot_depth);
        self.dissemination.publish_market_data(MarketDataEvent::Snapshot {
            symbol: snapshot.symbol,
            bids: snapshot.bids,
            asks: snapshot.asks,
            timestamp: snapshot.timestamp,
        });
        rx
    }

    pub fn subscribe_trades(&self, symbol: &str) -> tokio::sync::mpsc::Receiver<TradeEvent> {
        self.dissemination.subscribe_trades(symbol)
    }

    /// Shut the engine down: drain every book's exclusive section (taking
    /// and releasing its lock ensures no `submit`/`cancel` is mid-flight)
    /// and close every subscriber channel. After this call no new events
    /// reach existing subscribers; the engine itself remains queryable.
    pub fn shutdown(&self) {
        for entry in self.books.iter() {
            let _drained = entry.book.lock().expect("book mutex poisoned");
        }
        self.dissemination.shutdown();
        info!("matching engine shut down");
    }

    fn apply_fee_hook(&self, trades: &[crate::orderbook::trade::TradeExecution]) {
        let Some(schedule) = &self.fee_schedule else {
            return;
        };
        for trade in trades {
            let notional = trade.price * trade.quantity;
            let maker_fee = schedule.calculate_fee(notional, true);
            let taker_fee = schedule.calculate_fee(notional, false);
            tracing::trace!(
                trade_id = %trade.trade_id,
                %maker_fee,
                %taker_fee,
                "post-match fee computed"
            );
        }
    }

    fn emit_post_operation(
        &self,
        symbol: &str,
        entry: &BookEntry,
        trades: &[crate::orderbook::trade::TradeExecution],
        bbo_changed: bool,
    ) {
        for trade in trades {
            self.dissemination.publish_trade(
                symbol,
                TradeEvent {
                    symbol: symbol.to_string(),
                    trade: trade.clone(),
                },
            );
        }

        if trades.is_empty() && !bbo_changed {
            return;
        }

        let (bids, asks) = {
            let book = entry.book.lock().expect("book mutex poisoned");
            book.snapshot(self.config.default_snapshot_depth)
        };
        let timestamp = entry.sequencer.next();
        self.dissemination.publish_market_data(MarketDataEvent::BookUpdate {
            symbol: symbol.to_string(),
            bids: bids.clone(),
            asks: asks.clone(),
            timestamp,
        });

        if bbo_changed {
            self.dissemination.publish_market_data(MarketDataEvent::BboUpdate {
                symbol: symbol.to_string(),
                best_bid: bids.first().copied(),
                best_ask: asks.first().copied(),
                timestamp,
            });
        }
    }

    fn emit_lifecycle(&self, symbol: &str, order: &Order) {
        if !order.status.is_terminal() {
            return;
        }
        if order.status == OrderStatus::Rejected {
            warn!(symbol = %symbol, order_id = %order.order_id, "order rejected");
        }
        self.dissemination.publish_market_data(MarketDataEvent::Lifecycle {
            symbol: symbol.to_string(),
            order_id: order.order_id,
            status: order.status,
            timestamp: current_time_millis(),
        });
    }
}
