//! Currency conversion arithmetic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Use banker's rounding (round half to even)
//! - Round at conversion time, per account, before amounts are summed
//!   into aggregates

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places kept after a conversion.
pub const CONVERSION_DECIMAL_PLACES: u32 = 4;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative
/// errors, rounded to [`CONVERSION_DECIMAL_PLACES`].
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    convert_amount_with_precision(amount, rate, CONVERSION_DECIMAL_PLACES)
}

/// Converts an amount with a custom number of decimal places.
#[must_use]
pub fn convert_amount_with_precision(
    amount: Decimal,
    rate: Decimal,
    decimal_places: u32,
) -> Decimal {
    (amount * rate).round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}
