//! Order-type policy and the price-time priority matching loop.

use crate::decimal::Decimal;
use crate::order::Order;
use crate::orderbook::book::OrderBook;
use crate::orderbook::trade::{MatchOutcome, TradeExecution};
use crate::utils::Sequencer;
use tracing::trace;
use uuid::Uuid;

/// Run `taker` against `book` to completion, applying its order type's
/// execution policy, mutating `book` and returning every trade generated
/// plus the taker's final record.
///
/// Iterates the opposite side best-first, accumulates fills, and batch-drops
/// empty levels as it goes, adapted to `Decimal` prices and the
/// Market/Limit/Ioc/Fok policy table.
pub fn match_order(book: &mut OrderBook, mut taker: Order, sequencer: &Sequencer) -> MatchOutcome {
    let limit_price = taker.price;

    if taker.order_type.all_or_nothing() {
        let available = book.available_quantity(taker.side, limit_price, taker.quantity);
        if available < taker.quantity {
            trace!(
                order_id = %taker.order_id,
                requested = %taker.quantity,
                available = %available,
                "FOK aborted: insufficient liquidity, no mutation"
            );
            taker.cancel_remainder();
            return MatchOutcome {
                taker,
                trades: Vec::new(),
                filled_makers: Vec::new(),
            };
        }
    }

    let mut trades = Vec::new();
    let mut filled_makers = Vec::new();

    while taker.remaining_quantity() > Decimal::ZERO {
        let Some(level_price) = book.best_opposite(taker.side).map(|l| l.price) else {
            break;
        };
        if !crate::orderbook::book::price_acceptable(taker.side, level_price, limit_price) {
            break;
        }

        let level = book
            .best_opposite_mut(taker.side)
            .expect("level just observed to exist");
        let maker_remaining_before = level
            .head()
            .expect("non-empty level has a head")
            .remaining_quantity();
        let fill_qty = taker.remaining_quantity().min(maker_remaining_before);

        taker.apply_fill(fill_qty);
        let maker_after = level.decrement_head(fill_qty);

        let trade = TradeExecution {
            trade_id: Uuid::new_v4(),
            symbol: taker.symbol.clone(),
            price: level_price,
            quantity: fill_qty,
            aggressor_side: taker.side,
            maker_order_id: maker_after.order_id,
            taker_order_id: taker.order_id,
            timestamp: sequencer.next(),
        };
        trace!(
            symbol = %trade.symbol,
            price = %trade.price,
            quantity = %trade.quantity,
            maker = %trade.maker_order_id,
            taker = %trade.taker_order_id,
            "trade executed"
        );
        trades.push(trade);

        if maker_after.remaining_quantity() == Decimal::ZERO {
            book.remove_from_index(maker_after.order_id);
            filled_makers.push(maker_after);
        }
        book.drop_best_opposite_if_empty(taker.side);
    }

    if taker.remaining_quantity() > Decimal::ZERO && !taker.status.is_terminal() {
        if taker.order_type.rests_when_partially_filled() {
            book.insert_resting(taker.clone());
        } else {
            taker.cancel_remainder();
        }
    }

    debug_assert!(!book.is_crossed(), "matching loop left the book crossed");

    MatchOutcome {
        taker,
        trades,
        filled_makers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderRequest;
    use crate::types::{OrderType, Side};

    fn book_with_asks(levels: &[(&str, &str)]) -> OrderBook {
        let mut book = OrderBook::new("BTC/USD");
        for (price, qty) in levels {
            let req = OrderRequest {
                symbol: "BTC/USD".into(),
                side: Side::Sell,
                order_type: OrderType::Limit,
                quantity: qty.parse().unwrap(),
                price: Some(price.parse().unwrap()),
                user_id: None,
            };
            book.insert_resting(Order::new(Uuid::new_v4(), &req, 0));
        }
        book
    }

    fn taker(order_type: OrderType, qty: &str, price: Option<&str>) -> Order {
        let req = OrderRequest {
            symbol: "BTC/USD".into(),
            side: Side::Buy,
            order_type,
            quantity: qty.parse().unwrap(),
            price: price.map(|p| p.parse().unwrap()),
            user_id: None,
        };
        Order::new(Uuid::new_v4(), &req, 1)
    }

    #[test]
    fn simple_cross_fills_both_sides_at_maker_price() {
        let mut book = book_with_asks(&[("100", "1.0")]);
        let seq = Sequencer::new();
        let outcome = match_order(&mut book, taker(OrderType::Limit, "1.0", Some("101")), &seq);

        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].price, Decimal::new(100, 0));
        assert_eq!(outcome.taker.status, crate::types::OrderStatus::Filled);
        assert_eq!(outcome.filled_makers.len(), 1);
        assert!(book.is_empty());
    }

    #[test]
    fn filled_maker_is_removed_from_the_book_index() {
        let mut book = book_with_asks(&[("100", "1.0")]);
        let maker_id = book.best_ask_level().unwrap().head().unwrap().order_id;
        let seq = Sequencer::new();
        match_order(&mut book, taker(OrderType::Limit, "1.0", Some("101")), &seq);

        assert!(!book.contains(maker_id));
        assert!(book.get(maker_id).is_none());
    }

    #[test]
    fn partial_taker_leaves_maker_resting_with_remainder() {
        let mut book = book_with_asks(&[("100", "2.0")]);
        let seq = Sequencer::new();
        let outcome = match_order(&mut book, taker(OrderType::Market, "0.5", None), &seq);

        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].quantity, Decimal::new(5, 1));
        assert_eq!(outcome.taker.status, crate::types::OrderStatus::Filled);
        assert_eq!(book.best_ask(), Some(Decimal::new(100, 0)));
        assert_eq!(
            book.best_ask_level().unwrap().total_quantity(),
            Decimal::new(15, 1)
        );
    }

    #[test]
    fn price_time_priority_within_a_level_is_fifo() {
        let mut book = OrderBook::new("BTC/USD");
        let req_a = OrderRequest {
            symbol: "BTC/USD".into(),
            side: Side::Sell,
            order_type: OrderType::Limit,
            quantity: Decimal::new(1, 0),
            price: Some(Decimal::new(100, 0)),
            user_id: None,
        };
        let order_a = Order::new(Uuid::new_v4(), &req_a, 1);
        let order_b = Order::new(Uuid::new_v4(), &req_a, 2);
        let a_id = order_a.order_id;
        let b_id = order_b.order_id;
        book.insert_resting(order_a);
        book.insert_resting(order_b);

        let seq = Sequencer::new();
        let outcome = match_order(&mut book, taker(OrderType::Market, "1.5", None), &seq);

        assert_eq!(outcome.trades.len(), 2);
        assert_eq!(outcome.trades[0].maker_order_id, a_id);
        assert_eq!(outcome.trades[1].maker_order_id, b_id);
        assert_eq!(outcome.trades[1].quantity, Decimal::new(5, 1));
        let remaining_b = book.best_ask_level().unwrap().head().unwrap();
        assert_eq!(remaining_b.order_id, b_id);
        assert_eq!(remaining_b.remaining_quantity(), Decimal::new(5, 1));
    }

    #[test]
    fn ioc_partial_fill_cancels_remainder_without_resting() {
        let mut book = book_with_asks(&[("100", "1.0"), ("102", "1.0")]);
        let seq = Sequencer::new();
        let outcome = match_order(&mut book, taker(OrderType::Ioc, "3.0", Some("101")), &seq);

        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].price, Decimal::new(100, 0));
        assert_eq!(outcome.taker.status, crate::types::OrderStatus::Cancelled);
        assert_eq!(book.best_ask(), Some(Decimal::new(102, 0)));
    }

    #[test]
    fn fok_aborts_with_no_mutation_when_liquidity_insufficient() {
        let mut book = book_with_asks(&[("100", "1.0")]);
        let seq = Sequencer::new();
        let outcome = match_order(&mut book, taker(OrderType::Fok, "2.0", Some("101")), &seq);

        assert!(outcome.trades.is_empty());
        assert_eq!(outcome.taker.status, crate::types::OrderStatus::Cancelled);
        assert_eq!(book.best_ask(), Some(Decimal::new(100, 0)));
        assert_eq!(
            book.best_ask_level().unwrap().total_quantity(),
            Decimal::new(1, 0)
        );
    }

    #[test]
    fn market_against_empty_book_cancels_with_zero_trades() {
        let mut book = OrderBook::new("BTC/USD");
        let seq = Sequencer::new();
        let outcome = match_order(&mut book, taker(OrderType::Market, "1.0", None), &seq);

        assert!(outcome.trades.is_empty());
        assert_eq!(outcome.taker.status, crate::types::OrderStatus::Cancelled);
    }

    #[test]
    fn unfilled_limit_order_rests() {
        let mut book = book_with_asks(&[("105", "1.0")]);
        let seq = Sequencer::new();
        let outcome = match_order(&mut book, taker(OrderType::Limit, "1.0", Some("100")), &seq);

        assert!(outcome.trades.is_empty());
        assert_eq!(outcome.taker.status, crate::types::OrderStatus::Pending);
        assert_eq!(book.best_bid(), Some(Decimal::new(100, 0)));
    }
}
