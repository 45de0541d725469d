//! Unsigned big-integer helpers for base-unit token amounts
//!
//! Every amount flowing through pricing is a [`BigUint`], so negative values
//! cannot be represented at all and the only runtime domain failures left are
//! zero operands and zero divisors.

use alloy::primitives::U256;
use num_bigint::BigUint;
use num_traits::Zero;
use crate::errors::MathError;

pub fn mul(a: &BigUint, b: &BigUint) -> BigUint {
    a * b
}

pub fn add(a: &BigUint, b: &BigUint) -> BigUint {
    a + b
}

/// Floor division. The remainder is discarded, never rounded up.
pub fn floor_div(numerator: &BigUint, denominator: &BigUint) -> Result<BigUint, MathError> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(numerator / denominator)
}

pub fn require_positive(value: &BigUint, err: MathError) -> Result<(), MathError> {
    if value.is_zero() {
        return Err(err);
    }
    Ok(())
}

/// 10^exp as an exact integer
pub fn pow10(exp: u8) -> BigUint {
    BigUint::from(10u32).pow(u32::from(exp))
}

pub fn from_u256(value: U256) -> BigUint {
    BigUint::from_bytes_be(&value.to_be_bytes::<32>())
}
