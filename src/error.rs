//! Error taxonomy for the matching engine.
//!
//! `InsufficientLiquidity` is deliberately absent here: it is informational,
//! reported through the resulting order's status and `remaining_quantity`
//! rather than as an error (see [`crate::engine::SubmitOutcome`]).

use crate::decimal::Decimal;
use uuid::Uuid;

/// Everything that can go wrong calling into the matching engine.
///
/// `#[non_exhaustive]` so new variants can be added without a semver break;
/// callers should match on the variants they care about and fall through
/// on `_` rather than exhaustively enumerate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Malformed submission input. No side effects beyond marking the
    /// attempted order `REJECTED`.
    #[error("validation error: {reason}")]
    Validation {
        reason: String,
    },

    /// A non-positive quantity was submitted.
    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity { quantity: Decimal },

    /// A non-positive price was submitted where one is required.
    #[error("price must be positive, got {price}")]
    NonPositivePrice { price: Decimal },

    /// A value exceeded the configured decimal scale.
    #[error("{field} has more than {max_scale} fractional digits: {value}")]
    ScaleExceeded {
        field: &'static str,
        value: Decimal,
        max_scale: u32,
    },

    /// `order_type` required a price but none was supplied, or vice versa.
    #[error("order type {order_type} price coherence violated: price_present={price_present}")]
    PriceCoherence {
        order_type: crate::types::OrderType,
        price_present: bool,
    },

    /// Not raised by the engine itself, which auto-registers an empty book
    /// for any symbol it has not seen before. Kept as a typed variant for
    /// embedders that front the engine with their own symbol allow-list and
    /// want a matching error shape to reject against.
    #[error("unknown symbol: {symbol}")]
    UnknownSymbol { symbol: String },

    /// Referenced order does not exist in the book.
    #[error("order {order_id} not found")]
    NotFound { order_id: Uuid },

    /// The order exists but is not in a state the requested operation
    /// accepts (e.g. cancelling an already-terminal order).
    #[error("order {order_id} is in terminal state {status} and cannot be {attempted}")]
    InvalidState {
        order_id: Uuid,
        status: crate::types::OrderStatus,
        attempted: &'static str,
    },

    /// An invariant the engine guarantees was found violated. Always a bug,
    /// never a caller fault; surfaced rather than swallowed, and paired
    /// with a `debug_assert!`/`unreachable!` at the call site in debug
    /// builds.
    #[error("internal invariant violated: {context}")]
    Internal { context: String },
}

impl EngineError {
    /// Caller-facing error code for a `{code, message, details?}` error
    /// surface. Transport layers serialize on top of this.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation { .. }
            | EngineError::NonPositiveQuantity { .. }
            | EngineError::NonPositivePrice { .. }
            | EngineError::ScaleExceeded { .. }
            | EngineError::PriceCoherence { .. }
            | EngineError::UnknownSymbol { .. } => "VALIDATION_ERROR",
            EngineError::NotFound { .. } => "NOT_FOUND",
            EngineError::InvalidState { .. } => "INVALID_STATE",
            EngineError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_symbol_reports_validation_error_code() {
        let err = EngineError::UnknownSymbol {
            symbol: "XYZ/USD".to_string(),
        };
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn not_found_and_invalid_state_have_distinct_codes() {
        assert_eq!(
            EngineError::NotFound { order_id: Uuid::nil() }.code(),
            "NOT_FOUND"
        );
        assert_eq!(
            EngineError::InvalidState {
                order_id: Uuid::nil(),
                status: crate::types::OrderStatus::Cancelled,
                attempted: "cancel",
            }
            .code(),
            "INVALID_STATE"
        );
    }
}
