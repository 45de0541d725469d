//! Quote types returned by the aggregator

use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use rust_decimal::Decimal;
use serde::Serialize;
use super::PoolAnalytics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSummary {
    pub tvl_usd: Decimal,
    pub volume_24h_usd: Decimal,
    pub fees_24h_usd: Decimal,
    pub reserve0: String,
    pub reserve1: String,
    pub token0_symbol: String,
    pub token1_symbol: String,
    pub is_active: bool,
}

impl PoolSummary {
    pub fn from_analytics(analytics: &PoolAnalytics, min_tvl_usd: Decimal) -> Self {
        Self {
            tvl_usd: analytics.reserve_usd.round_dp(2),
            volume_24h_usd: analytics.volume_24h_usd.round_dp(2),
            fees_24h_usd: analytics.fees_24h_usd.round_dp(2),
            reserve0: analytics.reserve0.clone(),
            reserve1: analytics.reserve1.clone(),
            token0_symbol: analytics.token0_symbol.clone(),
            token1_symbol: analytics.token1_symbol.clone(),
            is_active: analytics.reserve_usd >= min_tvl_usd,
        }
    }
}

/// Output offered by a single pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DexQuote {
    pub exchange_name: String,
    pub pool_address: Address,
    pub output_amount: String,
    #[serde(skip)]
    pub output_base_units: BigUint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool_info: Option<PoolSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResult {
    pub from_token: String,
    pub to_token: String,
    pub from_address: Address,
    pub to_address: Address,
    pub from_amount: String,
    pub to_amount: String,
    pub best_quote: DexQuote,
    pub all_quotes: Vec<DexQuote>,
    pub quoted_at: DateTime<Utc>,
}
