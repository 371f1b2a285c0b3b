//! # matching-core
//!
//! The core matching engine of a limit-order-book trading system: a
//! per-symbol order book, a price-time-priority matching engine, and a
//! market-data dissemination fabric.
//!
//! ## Scope
//!
//! This crate is the in-process heart of an exchange: order admission,
//! type-specific execution policy (Market/Limit/IOC/FOK), trade generation,
//! and book mutation, plus fan-out of book/trade events to subscribers. The
//! external transport (request/response, streaming), authentication, rate
//! limiting, persistence, and deployment shell are all out of scope — this
//! crate is embedded by something that owns those concerns.
//!
//! ## Internal protection
//!
//! No resting order may be traded through when a better price is available
//! in the same book: a taker always executes at the best available maker
//! price, never a worse one. Price-time priority is strict: best price
//! first, then strict FIFO by admission order within a price level.
//!
//! ## Concurrency model
//!
//! Each symbol's [`orderbook::book::OrderBook`] is serialized behind its
//! own exclusive section inside [`MatchingEngine`]; concurrency across
//! symbols is unrestricted. The matching loop performs no I/O and never
//! suspends. Event emission into a subscriber's queue is non-blocking — a
//! full queue evicts the subscriber rather than stalling the matching path.
//!
//! ## Example
//!
//! ```
//! use matching_core::{EngineConfig, MatchingEngine};
//! use matching_core::order::OrderRequest;
//! use matching_core::types::{OrderType, Side};
//!
//! let engine = MatchingEngine::new(EngineConfig::default());
//!
//! engine.submit(OrderRequest {
//!     symbol: "BTC/USD".to_string(),
//!     side: Side::Sell,
//!     order_type: OrderType::Limit,
//!     quantity: "1.0".parse().unwrap(),
//!     price: Some("100".parse().unwrap()),
//!     user_id: None,
//! }).unwrap();
//!
//! let taker = engine.submit(OrderRequest {
//!     symbol: "BTC/USD".to_string(),
//!     side: Side::Buy,
//!     order_type: OrderType::Limit,
//!     quantity: "1.0".parse().unwrap(),
//!     price: Some("101".parse().unwrap()),
//!     user_id: None,
//! }).unwrap();
//!
//! assert_eq!(taker.filled_quantity, "1.0".parse().unwrap());
//! ```

pub mod config;
pub mod decimal;
pub mod dissemination;
pub mod engine;
pub mod error;
pub mod order;
pub mod orderbook;
pub mod prelude;
pub mod types;
mod utils;

pub use config::EngineConfig;
pub use engine::{Bbo, BookSnapshot, MatchingEngine, SubmitOutcome};
pub use error::EngineError;
pub use utils::current_time_millis;
