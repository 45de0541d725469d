//! Chain collaborator: pool discovery, reserves and token metadata

use alloy::primitives::Address;
use async_trait::async_trait;
use futures::future::join_all;
use num_bigint::BigUint;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::{
    amm::{FeeSchedule, from_u256},
    config::Config,
    errors::{QuoterError, QuoterResult},
    network::retry::{retry_with_backoff, RetryConfig},
    pools::{cache::ChainCache, reader::{ChainReader, RpcReader}},
    quoting::amount_out_for_reserves,
    types::{FACTORIES_MAINNET, PoolReserves, TokenInfo, VenuePool},
    ConcreteProvider,
};

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_pool_reserves(&self, pool: Address) -> QuoterResult<PoolReserves>;

    async fn get_token_info(&self, token: Address) -> QuoterResult<TokenInfo>;

    async fn find_pool(
        &self,
        venue: &str,
        token_a: Address,
        token_b: Address,
    ) -> QuoterResult<Option<Address>>;

    /// Pools for the pair on every known venue, in venue declaration order.
    /// Venues without a pool are left out. Fails with the collaborator error
    /// when every venue lookup errored.
    async fn find_all_pools(&self, token_a: Address, token_b: Address) -> QuoterResult<Vec<VenuePool>>;

    async fn get_quote_for_pool(
        &self,
        pool: Address,
        token_in: Address,
        amount_in: &BigUint,
    ) -> QuoterResult<BigUint> {
        let reserves = self.get_pool_reserves(pool).await?;
        amount_out_for_reserves(&reserves, pool, token_in, amount_in, FeeSchedule::STANDARD)
    }
}

/// [`ChainClient`] with retries and caching over a [`ChainReader`]
pub struct EthereumClient {
    reader: Arc<dyn ChainReader>,
    cache: Arc<ChainCache>,
    factories: Vec<(String, Address)>,
    retry: RetryConfig,
}

impl EthereumClient {
    pub fn new(provider: Arc<ConcreteProvider>, cache: Arc<ChainCache>, retry: RetryConfig) -> Self {
        Self::with_reader(Arc::new(RpcReader::new(provider)), cache, retry)
    }

    pub fn with_reader(reader: Arc<dyn ChainReader>, cache: Arc<ChainCache>, retry: RetryConfig) -> Self {
        Self {
            reader,
            cache,
            factories: FACTORIES_MAINNET
                .iter()
                .map(|(name, address)| (name.to_string(), *address))
                .collect(),
            retry,
        }
    }

    pub fn from_config(provider: Arc<ConcreteProvider>, cache: Arc<ChainCache>, config: &Config) -> Self {
        Self::new(provider, cache, RetryConfig::with_attempts(config.rpc_max_attempts))
    }

    pub fn venues(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(name, _)| name.as_str())
    }

    async fn pool_tokens(&self, pool: Address) -> QuoterResult<(Address, Address)> {
        if let Some(tokens) = self.cache.pool_tokens(pool).await {
            return Ok(tokens);
        }

        let reader = self.reader.as_ref();
        let tokens = retry_with_backoff(
            || async move { reader.pool_tokens(pool).await },
            &self.retry,
            &format!("get tokens for pool {}", pool),
        ).await?;

        self.cache.insert_pool_tokens(pool, tokens).await;
        Ok(tokens)
    }
}

#[async_trait]
impl ChainClient for EthereumClient {
    async fn get_pool_reserves(&self, pool: Address) -> QuoterResult<PoolReserves> {
        let (token0, token1) = self.pool_tokens(pool).await?;
        let reader = self.reader.as_ref();

        let observed_at_block = retry_with_backoff(
            || async move { reader.block_number().await },
            &self.retry,
            "get block number",
        ).await?;

        // Pinned so the snapshot and its block number agree
        let (reserve0, reserve1) = retry_with_backoff(
            || async move { reader.reserves_at(pool, observed_at_block).await },
            &self.retry,
            &format!("get reserves for {}", pool),
        ).await?;

        let reserves = PoolReserves {
            reserve0: from_u256(reserve0),
            reserve1: from_u256(reserve1),
            token0,
            token1,
            observed_at_block,
        };

        if !reserves.has_liquidity() {
            debug!(pool = %pool, block = observed_at_block, "Pool has an empty reserve");
        }

        Ok(reserves)
    }

    async fn get_token_info(&self, token: Address) -> QuoterResult<TokenInfo> {
        if let Some(info) = self.cache.token_info(token).await {
            return Ok(info);
        }

        let reader = self.reader.as_ref();
        let token_info = retry_with_backoff(
            || async move { reader.token_info(token).await },
            &self.retry,
            &format!("get token info for {}", token),
        ).await?;

        self.cache.insert_token_info(token_info.clone()).await;
        Ok(token_info)
    }

    async fn find_pool(
        &self,
        venue: &str,
        token_a: Address,
        token_b: Address,
    ) -> QuoterResult<Option<Address>> {
        let factory = self
            .factories
            .iter()
            .find(|(name, _)| name == venue)
            .map(|(_, address)| *address)
            .ok_or_else(|| QuoterError::UnknownVenue {
                venue: venue.to_string(),
            })?;

        let reader = self.reader.as_ref();
        retry_with_backoff(
            || async move { reader.get_pair(factory, token_a, token_b).await },
            &self.retry,
            &format!("getPair on {}", venue),
        ).await
        .map_err(|e| QuoterError::Contract {
            contract: factory,
            message: format!("Failed to look up {} pair", venue),
            source: anyhow::anyhow!("{}", e),
        })
    }

    async fn find_all_pools(&self, token_a: Address, token_b: Address) -> QuoterResult<Vec<VenuePool>> {
        let lookups = self.venues().map(|venue| async move {
            (venue, self.find_pool(venue, token_a, token_b).await)
        });

        let mut pools = Vec::new();
        let mut answered = false;
        let mut first_error = None;
        for (venue, result) in join_all(lookups).await {
            match result {
                Ok(Some(address)) => {
                    answered = true;
                    pools.push(VenuePool {
                        venue: venue.to_string(),
                        address,
                    });
                }
                Ok(None) => {
                    answered = true;
                    debug!(venue, "No pool for pair");
                }
                Err(e) => {
                    warn!(venue, error = %e, "Pool lookup failed, skipping venue");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        // An outage on every venue is not the same as "no pools"
        match first_error {
            Some(e) if !answered => Err(e),
            _ => Ok(pools),
        }
    }
}
