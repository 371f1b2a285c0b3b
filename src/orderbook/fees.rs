//! Fee schedule implementation for order book trading fees.
//!
//! Fee computation is a pluggable post-match hook: the matching engine
//! never computes fees itself, it only calls into an optionally attached
//! [`FeeSchedule`] after a trade has already been emitted.

use crate::decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configurable fee schedule for maker and taker fees.
///
/// Fees are expressed in basis points (bps), where 1 bps = 0.01% = 0.0001.
/// Negative values represent rebates (common for maker fees to provide
/// liquidity).
///
/// # Examples
///
/// ```
/// use matching_core::orderbook::fees::FeeSchedule;
/// use matching_core::decimal::Decimal;
///
/// // Standard fee schedule: 5 bps taker fee, 2 bps maker rebate
/// let schedule = FeeSchedule::new(-2, 5);
///
/// let notional = Decimal::new(10_000, 0);
/// let taker_fee = schedule.calculate_fee(notional, false);
/// assert_eq!(taker_fee, Decimal::new(5, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Maker fee in basis points (negative = rebate).
    pub maker_fee_bps: i32,
    /// Taker fee in basis points. Always positive or zero.
    pub taker_fee_bps: i32,
}

impl FeeSchedule {
    #[must_use = "FeeSchedule does nothing unless used"]
    pub fn new(maker_fee_bps: i32, taker_fee_bps: i32) -> Self {
        Self {
            maker_fee_bps,
            taker_fee_bps,
        }
    }

    /// Fee amount for a trade of `notional` value (price * quantity).
    /// Positive values are charges, negative values are rebates.
    #[must_use = "fee calculation result must be used"]
    pub fn calculate_fee(&self, notional: Decimal, is_maker: bool) -> Decimal {
        let bps = if is_maker {
            self.maker_fee_bps
        } else {
            self.taker_fee_bps
        };
        notional * Decimal::new(bps as i64, 4)
    }

    #[must_use]
    pub fn has_maker_rebate(&self) -> bool {
        self.maker_fee_bps < 0
    }

    #[must_use]
    pub fn is_zero_fee(&self) -> bool {
        self.maker_fee_bps == 0 && self.taker_fee_bps == 0
    }

    #[must_use]
    pub fn zero_fee() -> Self {
        Self::new(0, 0)
    }

    #[must_use]
    pub fn taker_only(taker_fee_bps: i32) -> Self {
        Self::new(0, taker_fee_bps)
    }

    #[must_use]
    pub fn with_maker_rebate(maker_rebate_bps: i32, taker_fee_bps: i32) -> Self {
        Self::new(-maker_rebate_bps.abs(), taker_fee_bps)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::zero_fee()
    }
}
