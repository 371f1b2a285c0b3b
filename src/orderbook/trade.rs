/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! Trade executions and the match outcome a single `submit` produces.

use crate::decimal::Decimal;
use crate::order::Order;
use crate::types::Side;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One fill between a resting maker and an incoming taker. Immutable after
/// emission; the executed price is always the maker's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeExecution {
    pub trade_id: Uuid,
    pub symbol: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub aggressor_side: Side,
    pub maker_order_id: Uuid,
    pub taker_order_id: Uuid,
    pub timestamp: u64,
}

/// Everything a single `submit` produced: the taker's final record, the
/// trades generated against it (in generation order), and any maker orders
/// that became fully filled along the way, so the engine can emit their
/// lifecycle events too.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub taker: Order,
    pub trades: Vec<TradeExecution>,
    pub filled_makers: Vec<Order>,
}

impl MatchOutcome {
    pub fn executed_quantity(&self) -> Decimal {
        self.trades.iter().fold(Decimal::ZERO, |acc, t| acc + t.quantity)
    }
}
