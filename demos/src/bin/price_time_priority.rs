// demos/src/bin/price_time_priority.rs
//
// Walks through the scenarios from the matching engine's design notes:
// a simple cross, a partial fill against a single maker, and strict FIFO
// consumption within one price level.
//
// Run with:
//   cargo run --bin price_time_priority

use matching_core::order::OrderRequest;
use matching_core::types::{OrderType, Side};
use matching_core::{EngineConfig, MatchingEngine};
use tracing::info;

fn limit(symbol: &str, side: Side, qty: &str, price: &str) -> OrderRequest {
    OrderRequest {
        symbol: symbol.to_string(),
        side,
        order_type: OrderType::Limit,
        quantity: qty.parse().unwrap(),
        price: Some(price.parse().unwrap()),
        user_id: None,
    }
}

fn market(symbol: &str, side: Side, qty: &str) -> OrderRequest {
    OrderRequest {
        symbol: symbol.to_string(),
        side,
        order_type: OrderType::Market,
        quantity: qty.parse().unwrap(),
        price: None,
        user_id: None,
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let engine = MatchingEngine::new(EngineConfig::default());
    let symbol = "BTC/USD";

    // Two resting asks at the same price, oldest first.
    let maker_a = engine.submit(limit(symbol, Side::Sell, "1.0", "100")).unwrap();
    let maker_b = engine.submit(limit(symbol, Side::Sell, "1.0", "100")).unwrap();
    info!(?maker_a, ?maker_b, "resting makers admitted");

    // A market buy for 1.5 consumes A in full, then 0.5 of B.
    let taker = engine.submit(market(symbol, Side::Buy, "1.5")).unwrap();
    info!(?taker, "taker filled via price-time priority");

    let bbo = engine.get_bbo(symbol);
    println!(
        "best ask after match: {:?} (0.5 of the second maker should remain)",
        bbo.best_ask
    );

    // A crossing limit order fills at the maker's price, not its own.
    engine.submit(limit(symbol, Side::Sell, "1.0", "100")).unwrap();
    let crossing = engine.submit(limit(symbol, Side::Buy, "1.0", "105")).unwrap();
    println!(
        "crossing taker filled {} at the resting maker's price, not its own limit of 105",
        crossing.filled_quantity
    );
}
