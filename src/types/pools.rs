//! Pool-related types and structures

use alloy::primitives::Address;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;

/// Reserve snapshot of a pair contract, read fresh for every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReserves {
    pub reserve0: BigUint,
    pub reserve1: BigUint,
    pub token0: Address,
    pub token1: Address,
    pub observed_at_block: u64,
}

impl PoolReserves {
    pub fn has_liquidity(&self) -> bool {
        !self.reserve0.is_zero() && !self.reserve1.is_zero()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// A pool discovered on one venue's factory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenuePool {
    pub venue: String,
    pub address: Address,
}
