//! Conversion between display amounts and integer base units

use num_bigint::BigUint;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::str::FromStr;
use crate::errors::{QuoterError, QuoterResult};
use super::arithmetic::pow10;

/// Parse a caller-supplied decimal integer string into a positive amount.
pub fn parse_amount(input: &str) -> QuoterResult<BigUint> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(QuoterError::invalid_amount(input, "amount cannot be empty"));
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QuoterError::invalid_amount(input, "invalid amount format"));
    }

    let amount = BigUint::from_str(digits)
        .map_err(|_| QuoterError::invalid_amount(input, "invalid amount format"))?;

    if negative || amount.is_zero() {
        return Err(QuoterError::invalid_amount(input, "amount must be positive"));
    }

    Ok(amount)
}

pub fn to_base_units(display_amount: &BigUint, decimals: u8) -> BigUint {
    display_amount * pow10(decimals)
}

/// Whole display units; any fractional part is dropped.
pub fn to_display_units(base_amount: &BigUint, decimals: u8) -> BigUint {
    base_amount / pow10(decimals)
}

/// Output received per whole input unit, keeping the fractional part that
/// [`to_display_units`] drops. `None` when the values do not fit a `Decimal`.
pub fn unit_price(amount_out: &BigUint, out_decimals: u8, display_in: &BigUint) -> Option<Decimal> {
    let mut out = Decimal::from_str(&amount_out.to_string()).ok()?;
    out.set_scale(u32::from(out_decimals)).ok()?;
    let input = Decimal::from_str(&display_in.to_string()).ok()?;
    out.checked_div(input).map(|p| p.normalize())
}
