//! Order records and the admission request they are built from.

use crate::decimal::Decimal;
use crate::error::EngineError;
use crate::types::{OrderStatus, OrderType, Side};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller input to `MatchingEngine::submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    /// Required for LIMIT/IOC/FOK, absent for MARKET.
    pub price: Option<Decimal>,
    pub user_id: Option<String>,
}

impl OrderRequest {
    /// Validate quantity/price positivity, decimal scale, and order-type
    /// price coherence, without mutating any book state.
    pub fn validate(&self, max_scale: u32) -> Result<(), EngineError> {
        if self.quantity <= Decimal::ZERO {
            return Err(EngineError::NonPositiveQuantity {
                quantity: self.quantity,
            });
        }
        if self.quantity.scale() > max_scale {
            return Err(EngineError::ScaleExceeded {
                field: "quantity",
                value: self.quantity,
                max_scale,
            });
        }

        let price_present = self.price.is_some();
        if self.order_type.requires_price() != price_present {
            return Err(EngineError::PriceCoherence {
                order_type: self.order_type,
                price_present,
            });
        }

        if let Some(price) = self.price {
            if price <= Decimal::ZERO {
                return Err(EngineError::NonPositivePrice { price });
            }
            if price.scale() > max_scale {
                return Err(EngineError::ScaleExceeded {
                    field: "price",
                    value: price,
                    max_scale,
                });
            }
        }

        if self.symbol.trim().is_empty() {
            return Err(EngineError::Validation {
                reason: "symbol must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// A live or terminal order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub filled_quantity: Decimal,
    pub status: OrderStatus,
    /// Strictly increasing per book; assigned on admission.
    pub timestamp: u64,
    pub user_id: Option<String>,
}

impl Order {
    pub fn new(
        order_id: Uuid,
        request: &OrderRequest,
        timestamp: u64,
    ) -> Self {
        Self {
            order_id,
            symbol: request.symbol.clone(),
            side: request.side,
            order_type: request.order_type,
            quantity: request.quantity,
            price: request.price,
            filled_quantity: Decimal::ZERO,
            status: OrderStatus::Pending,
            timestamp,
            user_id: request.user_id.clone(),
        }
    }

    /// `quantity - filled_quantity`, always `>= 0`.
    pub fn remaining_quantity(&self) -> Decimal {
        self.quantity - self.filled_quantity
    }

    /// Apply a fill of `qty` against this order, updating `filled_quantity`
    /// and `status` to stay consistent with the fill ratio.
    pub fn apply_fill(&mut self, qty: Decimal) {
        debug_assert!(qty > Decimal::ZERO);
        debug_assert!(qty <= self.remaining_quantity());
        self.filled_quantity += qty;
        self.status = if self.remaining_quantity() == Decimal::ZERO {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
    }

    /// Mark any unfilled remainder as cancelled (MARKET/IOC/FOK remainder,
    /// or an explicit `cancel`).
    pub fn cancel_remainder(&mut self) {
        debug_assert!(!self.status.is_terminal());
        self.status = OrderStatus::Cancelled;
    }

    pub fn reject(&mut self) {
        self.status = OrderStatus::Rejected;
    }

    pub fn is_buy(&self) -> bool {
        matches!(self.side, Side::Buy)
    }
}
