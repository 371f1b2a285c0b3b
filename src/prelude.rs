//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types from this crate. Instead of importing each type individually, you
//! can use:
//!
//! ```
//! use matching_core::prelude::*;
//! ```

// Engine
pub use crate::engine::{Bbo, BookSnapshot, MatchingEngine, SubmitOutcome};
pub use crate::config::EngineConfig;
pub use crate::error::EngineError;

// Order types
pub use crate::order::{Order, OrderRequest};
pub use crate::types::{OrderStatus, OrderType, Side};

// Decimal
pub use crate::decimal::Decimal;

// Order book
pub use crate::orderbook::{FeeSchedule, LevelSummary, MatchOutcome, OrderBook, PriceLevel, TradeExecution};

// Dissemination
pub use crate::dissemination::Dissemination;
pub use crate::orderbook::{MarketDataEvent, TradeEvent};

// Utility functions
pub use crate::current_time_millis;
