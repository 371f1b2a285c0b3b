//! A FIFO queue of resting orders at a single price.

use crate::decimal::Decimal;
use crate::order::Order;
use std::collections::VecDeque;
use uuid::Uuid;

/// All resting orders at one price, oldest first.
///
/// `total_quantity` and `order_count` are maintained incrementally so
/// `best_bid`/`best_ask` callers get O(1) depth without re-summing the
/// queue.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    pub price: Decimal,
    queue: VecDeque<Order>,
    total_quantity: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            queue: VecDeque::new(),
            total_quantity: Decimal::ZERO,
        }
    }

    /// Append to the tail. O(1).
    pub fn enqueue(&mut self, order: Order) {
        self.total_quantity += order.remaining_quantity();
        self.queue.push_back(order);
    }

    /// Oldest order at this price. O(1).
    pub fn head(&self) -> Option<&Order> {
        self.queue.front()
    }

    pub fn head_mut(&mut self) -> Option<&mut Order> {
        self.queue.front_mut()
    }

    /// Reduce the head order's remaining quantity by `qty`, removing it
    /// from the queue if it reaches zero. Panics if `qty` exceeds the
    /// head's remaining quantity or the queue is empty — both indicate a
    /// matching-loop bug, not a caller-recoverable condition.
    pub fn decrement_head(&mut self, qty: Decimal) -> Order {
        let head = self.queue.front_mut().expect("decrement_head on empty level");
        assert!(
            qty <= head.remaining_quantity(),
            "decrement_head: qty {qty} exceeds head remaining {}",
            head.remaining_quantity()
        );
        head.apply_fill(qty);
        self.total_quantity -= qty;

        let head_clone = head.clone();
        if head_clone.remaining_quantity() == Decimal::ZERO {
            self.queue.pop_front();
        }
        head_clone
    }

    /// Remove a specific order by id. O(k) in queue length.
    pub fn remove(&mut self, order_id: Uuid) -> Option<Order> {
        let pos = self.queue.iter().position(|o| o.order_id == order_id)?;
        let order = self.queue.remove(pos)?;
        self.total_quantity -= order.remaining_quantity();
        Some(order)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.queue.len()
    }

    pub fn total_quantity(&self) -> Decimal {
        self.total_quantity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderRequest;
    use crate::types::{OrderType, Side};

    fn order(qty: &str) -> Order {
        let req = OrderRequest {
            symbol: "BTC/USD".into(),
            side: Side::Buy,
            order_type: OrderType::Limit,
            quantity: qty.parse().unwrap(),
            price: Some("100".parse().unwrap()),
            user_id: None,
        };
        Order::new(Uuid::new_v4(), &req, 0)
    }

    #[test]
    fn enqueue_tracks_total_quantity_and_count() {
        let mut level = PriceLevel::new(Decimal::new(100, 0));
        level.enqueue(order("1.0"));
        level.enqueue(order("2.5"));
        assert_eq!(level.total_quantity(), Decimal::new(35, 1));
        assert_eq!(level.order_count(), 2);
    }

    #[test]
    fn decrement_head_removes_when_exhausted() {
        let mut level = PriceLevel::new(Decimal::new(100, 0));
        level.enqueue(order("1.0"));
        level.enqueue(order("1.0"));
        level.decrement_head(Decimal::new(1, 0));
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), Decimal::new(1, 0));
    }

    #[test]
    fn decrement_head_keeps_partially_filled_head_in_queue() {
        let mut level = PriceLevel::new(Decimal::new(100, 0));
        level.enqueue(order("2.0"));
        level.decrement_head(Decimal::new(5, 1));
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.head().unwrap().remaining_quantity(), Decimal::new(15, 1));
    }

    #[test]
    fn remove_by_id_updates_total_quantity() {
        let mut level = PriceLevel::new(Decimal::new(100, 0));
        let a = order("1.0");
        let id = a.order_id;
        level.enqueue(a);
        level.enqueue(order("1.0"));
        let removed = level.remove(id);
        assert!(removed.is_some());
        assert_eq!(level.order_count(), 1);
        assert_eq!(level.total_quantity(), Decimal::new(1, 0));
    }

    #[test]
    fn is_empty_true_only_when_no_orders_remain() {
        let mut level = PriceLevel::new(Decimal::new(100, 0));
        assert!(level.is_empty());
        let a = order("1.0");
        let id = a.order_id;
        level.enqueue(a);
        assert!(!level.is_empty());
        level.remove(id);
        assert!(level.is_empty());
    }
}
