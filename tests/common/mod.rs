//! In-memory collaborators for driving the quoting core without a node

#![allow(dead_code)]

use alloy::primitives::Address;
use async_trait::async_trait;
use dex_quoter::{
    analytics::AnalyticsClient,
    pools::ChainClient,
    types::{
        PoolAnalytics, PoolReserves, TokenInfo, VenuePool, DAI_MAINNET, UNI_MAINNET, USDC_MAINNET,
        USDT_MAINNET, WBTC_MAINNET, WETH_MAINNET,
    },
    QuoterError, QuoterResult,
};
use num_bigint::BigUint;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub const UNISWAP: &str = "UniswapV2";
pub const SUSHISWAP: &str = "Sushiswap";

pub fn pool_address(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Reserves with tokens in pair order (lower address is token0)
pub fn reserves(token_a: Address, amount_a: BigUint, token_b: Address, amount_b: BigUint) -> PoolReserves {
    let (token0, reserve0, token1, reserve1) = if token_a < token_b {
        (token_a, amount_a, token_b, amount_b)
    } else {
        (token_b, amount_b, token_a, amount_a)
    };
    PoolReserves {
        reserve0,
        reserve1,
        token0,
        token1,
        observed_at_block: 19_000_000,
    }
}

pub fn units(whole: u64, decimals: u32) -> BigUint {
    BigUint::from(whole) * BigUint::from(10u32).pow(decimals)
}

#[derive(Default)]
pub struct FakeChain {
    tokens: HashMap<Address, TokenInfo>,
    pools: Vec<VenuePool>,
    reserves: HashMap<Address, PoolReserves>,
    failing: HashSet<Address>,
    discovery_delay: Option<Duration>,
    discovery_fails: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeChain {
    pub fn mainnet() -> Self {
        let mut chain = Self::default();
        for (address, symbol, decimals) in [
            (WETH_MAINNET, "WETH", 18),
            (USDC_MAINNET, "USDC", 6),
            (USDT_MAINNET, "USDT", 6),
            (DAI_MAINNET, "DAI", 18),
            (WBTC_MAINNET, "WBTC", 8),
            (UNI_MAINNET, "UNI", 18),
        ] {
            chain.tokens.insert(
                address,
                TokenInfo {
                    address,
                    symbol: symbol.to_string(),
                    decimals,
                },
            );
        }
        chain
    }

    pub fn with_pool(mut self, venue: &str, pool: Address, reserves: PoolReserves) -> Self {
        self.pools.push(VenuePool {
            venue: venue.to_string(),
            address: pool,
        });
        self.reserves.insert(pool, reserves);
        self
    }

    /// A discovered pool whose reserve reads always fail
    pub fn with_failing_pool(mut self, venue: &str, pool: Address) -> Self {
        self.pools.push(VenuePool {
            venue: venue.to_string(),
            address: pool,
        });
        self.failing.insert(pool);
        self
    }

    pub fn with_discovery_delay(mut self, delay: Duration) -> Self {
        self.discovery_delay = Some(delay);
        self
    }

    /// Every venue lookup errors, as when the node is unreachable
    pub fn with_failing_discovery(mut self) -> Self {
        self.discovery_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn get_pool_reserves(&self, pool: Address) -> QuoterResult<PoolReserves> {
        self.record(format!("get_pool_reserves {pool}"));
        if self.failing.contains(&pool) {
            return Err(QuoterError::Network {
                message: format!("get reserves for {pool} failed after 3 attempts"),
                source: None,
                retry_count: 3,
            });
        }
        self.reserves.get(&pool).cloned().ok_or_else(|| QuoterError::Contract {
            contract: pool,
            message: "not a pair".to_string(),
            source: anyhow::anyhow!("execution reverted"),
        })
    }

    async fn get_token_info(&self, token: Address) -> QuoterResult<TokenInfo> {
        self.record(format!("get_token_info {token}"));
        self.tokens.get(&token).cloned().ok_or_else(|| QuoterError::Contract {
            contract: token,
            message: "not an ERC-20".to_string(),
            source: anyhow::anyhow!("execution reverted"),
        })
    }

    async fn find_pool(
        &self,
        venue: &str,
        token_a: Address,
        token_b: Address,
    ) -> QuoterResult<Option<Address>> {
        self.record(format!("find_pool {venue} {token_a} {token_b}"));
        Ok(self
            .pools
            .iter()
            .find(|pool| pool.venue == venue)
            .map(|pool| pool.address))
    }

    async fn find_all_pools(&self, token_a: Address, token_b: Address) -> QuoterResult<Vec<VenuePool>> {
        self.record(format!("find_all_pools {token_a} {token_b}"));
        if let Some(delay) = self.discovery_delay {
            tokio::time::sleep(delay).await;
        }
        if self.discovery_fails {
            return Err(QuoterError::Contract {
                contract: token_a,
                message: "Failed to look up UniswapV2 pair".to_string(),
                source: anyhow::anyhow!("error sending request: connection refused"),
            });
        }
        Ok(self.pools.clone())
    }
}

pub fn analytics_for(pool: Address, reserve_usd: Decimal) -> PoolAnalytics {
    PoolAnalytics {
        id: pool.to_string().to_lowercase(),
        token0: USDC_MAINNET.to_string().to_lowercase(),
        token1: WETH_MAINNET.to_string().to_lowercase(),
        token0_symbol: "USDC".to_string(),
        token1_symbol: "WETH".to_string(),
        reserve0: "1000000.0".to_string(),
        reserve1: "500.0".to_string(),
        reserve_usd,
        volume_usd: Decimal::ZERO,
        volume_24h_usd: Decimal::ZERO,
        fees_24h_usd: Decimal::ZERO,
    }
}

#[derive(Default)]
pub struct FakeAnalytics {
    by_pool: HashMap<Address, PoolAnalytics>,
    pair_query_fails: bool,
    pool_query_fails: bool,
    pool_lookups: Mutex<Vec<Address>>,
}

impl FakeAnalytics {
    pub fn with_pool(mut self, pool: Address, reserve_usd: Decimal) -> Self {
        self.by_pool.insert(pool, analytics_for(pool, reserve_usd));
        self
    }

    pub fn failing_pair_query(mut self) -> Self {
        self.pair_query_fails = true;
        self
    }

    pub fn failing_everything(mut self) -> Self {
        self.pair_query_fails = true;
        self.pool_query_fails = true;
        self
    }

    pub fn pool_lookups(&self) -> Vec<Address> {
        self.pool_lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsClient for FakeAnalytics {
    async fn get_pool_data(&self, pool: Address) -> QuoterResult<Option<PoolAnalytics>> {
        self.pool_lookups.lock().unwrap().push(pool);
        if self.pool_query_fails {
            return Err(QuoterError::Network {
                message: "Subgraph returned status 503 Service Unavailable".to_string(),
                source: None,
                retry_count: 0,
            });
        }
        Ok(self.by_pool.get(&pool).cloned())
    }

    async fn get_pools_by_token_pair(
        &self,
        _token_a: Address,
        _token_b: Address,
    ) -> QuoterResult<Vec<PoolAnalytics>> {
        if self.pair_query_fails {
            return Err(QuoterError::Network {
                message: "Subgraph returned status 503 Service Unavailable".to_string(),
                source: None,
                retry_count: 0,
            });
        }
        let mut pools: Vec<_> = self.by_pool.values().cloned().collect();
        pools.sort_by(|a, b| b.reserve_usd.cmp(&a.reserve_usd));
        Ok(pools)
    }
}
