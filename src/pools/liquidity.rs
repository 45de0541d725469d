//! Minimum-liquidity filtering based on indexed TVL

use rust_decimal::Decimal;
use crate::types::PoolAnalytics;

/// Pools without analytics always pass; the floor cannot be evaluated for them.
pub fn passes_liquidity_floor(analytics: Option<&PoolAnalytics>, min_tvl_usd: Decimal) -> bool {
    match analytics {
        Some(data) => data.reserve_usd >= min_tvl_usd,
        None => true,
    }
}
