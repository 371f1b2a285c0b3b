//! Fixed-point decimal price/quantity type.
//!
//! All prices and quantities in this crate are [`Decimal`] values: an
//! integer mantissa plus a scale, never a binary float. Arithmetic is exact
//! and comparisons are exact equality/ordering on the decimal value.

pub use rust_decimal::Decimal;

/// Maximum number of fractional digits accepted anywhere in this crate.
pub const MAX_SCALE: u32 = 8;

/// True iff `value` has no more than [`MAX_SCALE`] fractional digits.
///
/// `rust_decimal` normalizes trailing zeros away from `scale()` only on
/// explicit `normalize()`, so callers that parsed a value straight from a
/// decimal string should normalize first if they want `1.00` to read as
/// scale 0 rather than 2.
pub fn within_scale(value: Decimal) -> bool {
    value.scale() <= MAX_SCALE
}
