//! Constant-product output calculation with a proportional input fee

use num_bigint::BigUint;
use crate::errors::MathError;
use super::arithmetic::{add, floor_div, mul, require_positive};

/// Fee expressed as the fraction of the input that reaches the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    numerator: u32,
    denominator: u32,
}

impl FeeSchedule {
    /// 0.3% fee, the standard constant-product pair convention
    pub const STANDARD: FeeSchedule = FeeSchedule {
        numerator: 997,
        denominator: 1000,
    };

    pub fn new(numerator: u32, denominator: u32) -> Result<Self, MathError> {
        if denominator == 0 {
            return Err(MathError::DivisionByZero);
        }
        if numerator == 0 || numerator > denominator {
            return Err(MathError::InvalidFee { numerator, denominator });
        }
        Ok(Self { numerator, denominator })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Output amount for swapping `amount_in` into a pool:
///
/// `floor(amount_in * fee_num * reserve_out / (reserve_in * fee_den + amount_in * fee_num))`
pub fn get_amount_out(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
    fee: FeeSchedule,
) -> Result<BigUint, MathError> {
    require_positive(amount_in, MathError::ZeroInput)?;
    require_positive(reserve_in, MathError::ZeroReserve { side: "in" })?;
    require_positive(reserve_out, MathError::ZeroReserve { side: "out" })?;

    let amount_in_with_fee = mul(amount_in, &BigUint::from(fee.numerator));
    let numerator = mul(&amount_in_with_fee, reserve_out);
    let reserve_in_scaled = mul(reserve_in, &BigUint::from(fee.denominator));
    let denominator = add(&reserve_in_scaled, &amount_in_with_fee);

    floor_div(&numerator, &denominator)
}
