//! Fixed-point money helpers for the `$`-prefixed price format.

use crate::utils::constants::{CURRENCY_PREFIX, SALES_SCALE};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Parse a raw price such as `"$3.00"`.
///
/// Only a single leading `$` is stripped; anything else must be a plain
/// decimal number. Returns `None` when the remainder is not numeric.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(CURRENCY_PREFIX).unwrap_or(trimmed);
    if digits.is_empty() {
        return None;
    }
    Decimal::from_str(digits).ok()
}

/// Parse a raw quantity. Must be a non-negative integer.
pub fn parse_quantity(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Exact line-item amount, `None` on overflow.
pub fn line_amount(price: Decimal, quantity: u32) -> Option<Decimal> {
    price.checked_mul(Decimal::from(quantity))
}

/// Round half-up (midpoint away from zero) to the canonical scale and pin
/// the scale so the rendered value always carries exactly two digits.
pub fn round_sales(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(SALES_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SALES_SCALE);
    rounded
}

/// Render an amount the way the canonical Sales column stores it.
pub fn format_sales(amount: Decimal) -> String {
    round_sales(amount).to_string()
}
