//! Quoter configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;

// Configuration constants
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";
pub const DEFAULT_MIN_TVL_USD: Decimal = dec!(1000);
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_GRAPH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RPC_MAX_ATTEMPTS: u32 = 3;
pub const MAX_RPC_ATTEMPTS: u32 = 10;

// Upper bound on pools returned by a pair-level analytics query
pub const ANALYTICS_PAIR_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub graph_url: Option<String>,
    pub min_tvl_usd: Decimal,
    pub request_timeout_secs: u64,
    pub graph_timeout_secs: u64,
    pub rpc_max_attempts: u32,
}

impl Config {
    pub fn load() -> Self {
        Self {
            rpc_url: env::var("ETH_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            graph_url: env::var("THEGRAPH_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            min_tvl_usd: env::var("MIN_TVL_USD")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .unwrap_or(DEFAULT_MIN_TVL_USD)
                .max(dec!(0)),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .clamp(1, MAX_REQUEST_TIMEOUT_SECS),
            graph_timeout_secs: env::var("GRAPH_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_GRAPH_TIMEOUT_SECS)
                .max(1),
            rpc_max_attempts: env::var("RPC_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RPC_MAX_ATTEMPTS)
                .clamp(1, MAX_RPC_ATTEMPTS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            graph_url: None,
            min_tvl_usd: DEFAULT_MIN_TVL_USD,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            graph_timeout_secs: DEFAULT_GRAPH_TIMEOUT_SECS,
            rpc_max_attempts: DEFAULT_RPC_MAX_ATTEMPTS,
        }
    }
}
