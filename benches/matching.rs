//! Benchmarks for the hot matching path: resting-order insertion, a
//! crossing market order walking multiple price levels, and cancellation
//! against a populated book.
//!
//! One `Criterion` group per concern, `bench_with_input` over a range of
//! order counts, `iter_with_setup` to exclude book population from the
//! measured time.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use matching_core::order::OrderRequest;
use matching_core::types::{OrderType, Side};
use matching_core::{EngineConfig, MatchingEngine};
use std::hint::black_box;

const SYMBOL: &str = "BTC/USD";

fn limit(side: Side, qty: &str, price: &str) -> OrderRequest {
    OrderRequest {
        symbol: SYMBOL.to_string(),
        side,
        order_type: OrderType::Limit,
        quantity: qty.parse().unwrap(),
        price: Some(price.parse().unwrap()),
        user_id: None,
    }
}

fn market(side: Side, qty: &str) -> OrderRequest {
    OrderRequest {
        symbol: SYMBOL.to_string(),
        side,
        order_type: OrderType::Market,
        quantity: qty.parse().unwrap(),
        price: None,
        user_id: None,
    }
}

fn bench_resting_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - resting insertion");

    for &order_count in &[100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("submit_limit_orders", order_count),
            &order_count,
            |b, &count| {
                b.iter_with_setup(
                    || MatchingEngine::new(EngineConfig::default()),
                    |engine| {
                        for i in 0..count {
                            let price = 1_000 + (i % 500);
                            black_box(
                                engine
                                    .submit(limit(Side::Buy, "1", &price.to_string()))
                                    .unwrap(),
                            );
                        }
                    },
                );
            },
        );
    }

    group.finish();
}

fn bench_crossing_market_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - crossing market order");

    for &level_count in &[10, 100, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("market_order_walks_levels", level_count),
            &level_count,
            |b, &levels| {
                b.iter_with_setup(
                    || {
                        let engine = MatchingEngine::new(EngineConfig::default());
                        for i in 0..levels {
                            engine
                                .submit(limit(Side::Sell, "1", &(1_000 + i).to_string()))
                                .unwrap();
                        }
                        engine
                    },
                    |engine| {
                        black_box(engine.submit(market(Side::Buy, &levels.to_string())).unwrap());
                    },
                );
            },
        );
    }

    group.finish();
}

fn bench_cancellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("MatchingEngine - cancellation");

    for &order_count in &[100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("cancel_last_inserted", order_count),
            &order_count,
            |b, &count| {
                b.iter_with_setup(
                    || {
                        let engine = MatchingEngine::new(EngineConfig::default());
                        let mut ids = Vec::with_capacity(count as usize);
                        for i in 0..count {
                            let price = 1_000 + (i % 500);
                            let outcome = engine
                                .submit(limit(Side::Buy, "1", &price.to_string()))
                                .unwrap();
                            ids.push(outcome.order_id);
                        }
                        (engine, ids)
                    },
                    |(engine, ids)| {
                        for id in ids {
                            black_box(engine.cancel(id).unwrap());
                        }
                    },
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_resting_insertion,
    bench_crossing_market_order,
    bench_cancellation,
);
criterion_main!(benches);
