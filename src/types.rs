//! Core enums shared across the order book, matching engine and
//! dissemination layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the book an order rests on or trades against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an aggressor on `self` consumes liquidity from.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order-type execution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// No price; matches at any price; remainder cancelled, never rests.
    Market,
    /// Priced; matches up to its limit; rests if partially unfilled.
    Limit,
    /// Immediate-or-cancel: priced, matches up to its limit, never rests.
    Ioc,
    /// Fill-or-kill: priced, all-or-nothing, never rests.
    Fok,
}

impl OrderType {
    /// Whether this order type requires a limit price on admission.
    pub fn requires_price(self) -> bool {
        !matches!(self, OrderType::Market)
    }

    /// Whether a partially-filled instance of this order type is allowed
    /// to rest on the book once the matching loop stops.
    pub fn rests_when_partially_filled(self) -> bool {
        matches!(self, OrderType::Limit)
    }

    /// Whether this order type must fill in full or not at all.
    pub fn all_or_nothing(self) -> bool {
        matches!(self, OrderType::Fok)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Ioc => "IOC",
            OrderType::Fok => "FOK",
        };
        write!(f, "{s}")
    }
}

/// Lifecycle status of an [`crate::order::Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    PartiallyFilled,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Terminal statuses never transition further.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }

    /// Whether an order in this status currently rests in a price level.
    pub fn is_resting(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::PartiallyFilled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Rejected => "REJECTED",
        };
        write!(f, "{s}")
    }
}
