//! Single-pool output estimation

use alloy::primitives::Address;
use num_bigint::BigUint;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;
use crate::{
    amm::{FeeSchedule, get_amount_out, parse_amount},
    errors::{QuoterError, QuoterResult},
    network::RequestContext,
    pools::ChainClient,
    types::PoolReserves,
};

pub fn parse_address(input: &str) -> QuoterResult<Address> {
    Address::from_str(input.trim()).map_err(|_| QuoterError::InvalidAddress {
        input: input.to_string(),
    })
}

/// Which side of the pool a token sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSide {
    Token0,
    Token1,
}

impl PoolSide {
    pub fn of(reserves: &PoolReserves, pool: Address, token: Address) -> QuoterResult<Self> {
        if token == reserves.token0 {
            Ok(PoolSide::Token0)
        } else if token == reserves.token1 {
            Ok(PoolSide::Token1)
        } else {
            Err(QuoterError::TokenNotInPool { pool, token })
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            PoolSide::Token0 => PoolSide::Token1,
            PoolSide::Token1 => PoolSide::Token0,
        }
    }
}

/// `(reserve_in, reserve_out)` for a swap selling `token_in`
pub fn orient_reserves(
    reserves: &PoolReserves,
    pool: Address,
    token_in: Address,
) -> QuoterResult<(&BigUint, &BigUint)> {
    match PoolSide::of(reserves, pool, token_in)? {
        PoolSide::Token0 => Ok((&reserves.reserve0, &reserves.reserve1)),
        PoolSide::Token1 => Ok((&reserves.reserve1, &reserves.reserve0)),
    }
}

pub fn amount_out_for_reserves(
    reserves: &PoolReserves,
    pool: Address,
    token_in: Address,
    amount_in: &BigUint,
    fee: FeeSchedule,
) -> QuoterResult<BigUint> {
    let (reserve_in, reserve_out) = orient_reserves(reserves, pool, token_in)?;
    Ok(get_amount_out(amount_in, reserve_in, reserve_out, fee)?)
}

/// Point estimate against one explicitly named pool
#[derive(Clone)]
pub struct PoolEstimator {
    chain: Arc<dyn ChainClient>,
}

impl PoolEstimator {
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// Destination base units received for `src_amount` base units of `src`.
    /// Any failure fails the whole call.
    pub async fn estimate(
        &self,
        ctx: &RequestContext,
        pool: &str,
        src: &str,
        dst: &str,
        src_amount: &str,
    ) -> QuoterResult<BigUint> {
        let pool = parse_address(pool)?;
        let src = parse_address(src)?;
        let dst = parse_address(dst)?;
        if src == dst {
            return Err(QuoterError::IdenticalTokens { token: src });
        }
        let amount_in = parse_amount(src_amount)?;

        ctx.run(async {
            let reserves = self.chain.get_pool_reserves(pool).await?;

            let side = PoolSide::of(&reserves, pool, src)?;
            if PoolSide::of(&reserves, pool, dst)? != side.opposite() {
                return Err(QuoterError::TokenNotInPool { pool, token: dst });
            }

            let amount_out = amount_out_for_reserves(&reserves, pool, src, &amount_in, FeeSchedule::STANDARD)?;
            debug!(
                pool = %pool,
                block = reserves.observed_at_block,
                amount_in = %amount_in,
                amount_out = %amount_out,
                "Estimated swap"
            );
            Ok(amount_out)
        })
        .await
    }
}
