//! Off-chain pool analytics

use rust_decimal::Decimal;
use serde::Serialize;

/// Indexed pool statistics. Annotation and liquidity filtering only, never pricing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolAnalytics {
    pub id: String,
    pub token0: String,
    pub token1: String,
    pub token0_symbol: String,
    pub token1_symbol: String,
    pub reserve0: String,
    pub reserve1: String,
    pub reserve_usd: Decimal,
    pub volume_usd: Decimal,
    pub volume_24h_usd: Decimal,
    pub fees_24h_usd: Decimal,
}
