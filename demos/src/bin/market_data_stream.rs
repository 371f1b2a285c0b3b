// demos/src/bin/market_data_stream.rs
//
// Subscribes to a symbol's market-data and trade streams before any
// orders are submitted, then submits a crossing pair and prints every
// event the dissemination layer fans out, in emission order.
//
// Run with:
//   cargo run --bin market_data_stream

use matching_core::order::OrderRequest;
use matching_core::types::{OrderType, Side};
use matching_core::{EngineConfig, MatchingEngine};
use std::sync::Arc;

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

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let engine = Arc::new(MatchingEngine::new(EngineConfig::default()));
    let symbol = "ETH/USD";

    let mut market_data = engine.subscribe_market_data(symbol);
    let mut trades = engine.subscribe_trades(symbol);

    let market_data_task = tokio::spawn(async move {
        while let Some(event) = market_data.recv().await {
            println!("market-data: {event:?}");
        }
    });
    let trade_task = tokio::spawn(async move {
        while let Some(event) = trades.recv().await {
            println!("trade: {event:?}");
        }
    });

    engine.submit(limit(symbol, Side::Sell, "2.0", "3200")).unwrap();
    engine.submit(limit(symbol, Side::Buy, "2.0", "3200")).unwrap();

    // Give the subscriber tasks a moment to drain, then drop the engine so
    // both channels close and the tasks above exit their recv loops.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    drop(engine);

    let _ = tokio::join!(market_data_task, trade_task);
}
