//! Per-symbol order book: two ordered price->level maps plus an order-id
//! index.

use crate::decimal::Decimal;
use crate::error::EngineError;
use crate::order::Order;
use crate::orderbook::price_level::PriceLevel;
use crate::types::Side;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// One level of a snapshot: price, aggregate remaining quantity, resting
/// order count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub price: Decimal,
    pub quantity: Decimal,
    pub order_count: usize,
}

/// `symbol`'s resting liquidity. Bids are keyed by `Reverse<Decimal>` so
/// the map's natural ascending iteration order is descending price
/// (best bid first); asks are keyed directly, so ascending iteration is
/// already best-ask-first.
pub struct OrderBook {
    pub symbol: String,
    bids: BTreeMap<Reverse<Decimal>, PriceLevel>,
    asks: BTreeMap<Decimal, PriceLevel>,
    index: HashMap<Uuid, (Side, Decimal)>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    /// Place a resting order on its side at its price. The caller is
    /// responsible for only calling this with a limit-priced order that is
    /// not currently marketable.
    pub fn insert_resting(&mut self, order: Order) {
        let side = order.side;
        let price = order.price.expect("insert_resting requires a priced order");
        let order_id = order.order_id;

        match side {
            Side::Buy => self
                .bids
                .entry(Reverse(price))
                .or_insert_with(|| PriceLevel::new(price))
                .enqueue(order),
            Side::Sell => self
                .asks
                .entry(price)
                .or_insert_with(|| PriceLevel::new(price))
                .enqueue(order),
        }
        self.index.insert(order_id, (side, price));
    }

    /// Remove a resting order, dropping its price level if now empty.
    pub fn cancel(&mut self, order_id: Uuid) -> Result<Order, EngineError> {
        let Some(&(side, price)) = self.index.get(&order_id) else {
            return Err(EngineError::NotFound { order_id });
        };

        let removed = match side {
            Side::Buy => {
                let key = Reverse(price);
                let level = self.bids.get_mut(&key).expect("index/book desync on bid side");
                let order = level.remove(order_id);
                if level.is_empty() {
                    self.bids.remove(&key);
                }
                order
            }
            Side::Sell => {
                let level = self.asks.get_mut(&price).expect("index/book desync on ask side");
                let order = level.remove(order_id);
                if level.is_empty() {
                    self.asks.remove(&price);
                }
                order
            }
        };

        self.index.remove(&order_id);
        removed.ok_or(EngineError::Internal {
            context: format!("order {order_id} indexed but absent from its price level"),
        })
    }

    /// Drop a resting order's id from the index without touching either
    /// price-level map. Used by the matching loop once
    /// `PriceLevel::decrement_head` has already popped a fully-filled
    /// maker from its queue, so its index entry does not outlive it.
    pub fn remove_from_index(&mut self, order_id: Uuid) {
        self.index.remove(&order_id);
    }

    /// Whether `order_id` is currently resting (present in the index).
    pub fn contains(&self, order_id: Uuid) -> bool {
        self.index.contains_key(&order_id)
    }

    /// Current record of a resting order, found via the index in O(1) plus
    /// an O(k) scan of its level — the same complexity budget as
    /// `PriceLevel::remove`.
    pub fn get(&self, order_id: Uuid) -> Option<&Order> {
        let &(side, price) = self.index.get(&order_id)?;
        let level = match side {
            Side::Buy => self.bids.get(&Reverse(price)),
            Side::Sell => self.asks.get(&price),
        }?;
        level.iter().find(|o| o.order_id == order_id)
    }

    pub fn best_bid_level(&self) -> Option<&PriceLevel> {
        self.bids.values().next()
    }

    pub fn best_ask_level(&self) -> Option<&PriceLevel> {
        self.asks.values().next()
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.best_bid_level().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.best_ask_level().map(|l| l.price)
    }

    /// True iff the book is in a crossed state — forbidden to observe
    /// outside an in-progress matching step.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// The best opposite-side price level for a taker on `taker_side`,
    /// i.e. the first candidate `iter_matching` would yield. Returns `None`
    /// when that side is empty.
    pub fn best_opposite(&self, taker_side: Side) -> Option<&PriceLevel> {
        match taker_side {
            Side::Buy => self.best_ask_level(),
            Side::Sell => self.best_bid_level(),
        }
    }

    pub fn best_opposite_mut(&mut self, taker_side: Side) -> Option<&mut PriceLevel> {
        match taker_side {
            Side::Buy => self.asks.values_mut().next(),
            Side::Sell => self.bids.values_mut().next(),
        }
    }

    /// Drop the best opposite-side level if it has become empty. Called by
    /// the matching loop after `decrement_head` empties a level.
    pub fn drop_best_opposite_if_empty(&mut self, taker_side: Side) {
        match taker_side {
            Side::Buy => {
                if let Some((&price, level)) = self.asks.iter().next() {
                    if level.is_empty() {
                        self.asks.remove(&price);
                    }
                }
            }
            Side::Sell => {
                if let Some((&key, level)) = self.bids.iter().next() {
                    if level.is_empty() {
                        self.bids.remove(&key);
                    }
                }
            }
        }
    }

    /// Lazy best-first traversal of the side opposite `taker_side`,
    /// filtered to levels acceptable to `limit_price`. `limit_price = None`
    /// models a MARKET taker (acceptable at any price).
    pub fn iter_matching(
        &self,
        taker_side: Side,
        limit_price: Option<Decimal>,
    ) -> impl Iterator<Item = &PriceLevel> {
        let buy_side = matches!(taker_side, Side::Buy);
        let asks = if buy_side { Some(self.asks.values()) } else { None };
        let bids = if !buy_side { Some(self.bids.values()) } else { None };

        asks.into_iter()
            .flatten()
            .chain(bids.into_iter().flatten())
            .filter(move |level| price_acceptable(taker_side, level.price, limit_price))
    }

    /// Sum of resting quantity acceptable to a taker on `taker_side` with
    /// `limit_price`, capped at `target`. Used by FOK's dry-run check before
    /// it commits to matching.
    pub fn available_quantity(
        &self,
        taker_side: Side,
        limit_price: Option<Decimal>,
        target: Decimal,
    ) -> Decimal {
        let mut total = Decimal::ZERO;
        for level in self.iter_matching(taker_side, limit_price) {
            total += level.total_quantity();
            if total >= target {
                break;
            }
        }
        total
    }

    /// Top `depth` levels on each side, best-first.
    pub fn snapshot(&self, depth: usize) -> (Vec<LevelSummary>, Vec<LevelSummary>) {
        let bids = self
            .bids
            .values()
            .take(depth)
            .map(|l| LevelSummary {
                price: l.price,
                quantity: l.total_quantity(),
                order_count: l.order_count(),
            })
            .collect();
        let asks = self
            .asks
            .values()
            .take(depth)
            .map(|l| LevelSummary {
                price: l.price,
                quantity: l.total_quantity(),
                order_count: l.order_count(),
            })
            .collect();
        (bids, asks)
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// For a BUY taker, a level is acceptable when `level.price <= limit`; for
/// a SELL taker, when `level.price >= limit`. `None` (MARKET) is always
/// acceptable.
pub fn price_acceptable(taker_side: Side, level_price: Decimal, limit_price: Option<Decimal>) -> bool {
    match limit_price {
        None => true,
        Some(limit) => match taker_side {
            Side::Buy => level_price <= limit,
            Side::Sell => level_price >= limit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderRequest;
    use crate::types::OrderType;

    fn resting_order(side: Side, price: &str, qty: &str) -> Order {
        let req = OrderRequest {
            symbol: "BTC/USD".into(),
            side,
            order_type: OrderType::Limit,
            quantity: qty.parse().unwrap(),
            price: Some(price.parse().unwrap()),
            user_id: None,
        };
        Order::new(Uuid::new_v4(), &req, 0)
    }

    #[test]
    fn best_bid_and_ask_track_extremes() {
        let mut book = OrderBook::new("BTC/USD");
        book.insert_resting(resting_order(Side::Buy, "100", "1.0"));
        book.insert_resting(resting_order(Side::Buy, "101", "1.0"));
        book.insert_resting(resting_order(Side::Sell, "105", "1.0"));
        book.insert_resting(resting_order(Side::Sell, "103", "1.0"));

        assert_eq!(book.best_bid(), Some(Decimal::new(101, 0)));
        assert_eq!(book.best_ask(), Some(Decimal::new(103, 0)));
        assert!(!book.is_crossed());
    }

    #[test]
    fn cancel_removes_order_and_empty_level() {
        let mut book = OrderBook::new("BTC/USD");
        let order = resting_order(Side::Buy, "100", "1.0");
        let id = order.order_id;
        book.insert_resting(order);

        let cancelled = book.cancel(id).unwrap();
        assert_eq!(cancelled.order_id, id);
        assert!(book.best_bid().is_none());
        assert!(!book.contains(id));
    }

    #[test]
    fn cancel_unknown_order_is_not_found() {
        let mut book = OrderBook::new("BTC/USD");
        let err = book.cancel(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn iter_matching_respects_acceptability_and_order() {
        let mut book = OrderBook::new("BTC/USD");
        book.insert_resting(resting_order(Side::Sell, "102", "1.0"));
        book.insert_resting(resting_order(Side::Sell, "100", "1.0"));
        book.insert_resting(resting_order(Side::Sell, "104", "1.0"));

        let prices: Vec<_> = book
            .iter_matching(Side::Buy, Some(Decimal::new(102, 0)))
            .map(|l| l.price)
            .collect();
        assert_eq!(prices, vec![Decimal::new(100, 0), Decimal::new(102, 0)]);
    }

    #[test]
    fn snapshot_is_best_first_and_depth_limited() {
        let mut book = OrderBook::new("BTC/USD");
        for p in ["98", "99", "100"] {
            book.insert_resting(resting_order(Side::Buy, p, "1.0"));
        }
        let (bids, _asks) = book.snapshot(2);
        assert_eq!(bids.len(), 2);
        assert_eq!(bids[0].price, Decimal::new(100, 0));
        assert_eq!(bids[1].price, Decimal::new(99, 0));
    }
}
