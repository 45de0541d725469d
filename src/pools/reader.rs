//! Raw contract reads underneath [`EthereumClient`](super::EthereumClient)

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use crate::{
    pools::{factory, info, reserves},
    types::TokenInfo,
    ConcreteProvider,
};

/// Single-shot chain reads with no caching or retries
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn block_number(&self) -> Result<u64>;

    async fn pool_tokens(&self, pool: Address) -> Result<(Address, Address)>;

    async fn reserves_at(&self, pool: Address, block: u64) -> Result<(U256, U256)>;

    async fn token_info(&self, token: Address) -> Result<TokenInfo>;

    async fn get_pair(&self, factory: Address, token_a: Address, token_b: Address) -> Result<Option<Address>>;
}

/// [`ChainReader`] over an alloy JSON-RPC provider
pub struct RpcReader {
    provider: Arc<ConcreteProvider>,
}

impl RpcReader {
    pub fn new(provider: Arc<ConcreteProvider>) -> Self {
        Self { provider }
    }

    fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}

#[async_trait]
impl ChainReader for RpcReader {
    async fn block_number(&self) -> Result<u64> {
        self.provider().get_block_number().await
            .context("Failed to get current block number")
    }

    async fn pool_tokens(&self, pool: Address) -> Result<(Address, Address)> {
        info::get_pool_tokens(self.provider(), pool).await
    }

    async fn reserves_at(&self, pool: Address, block: u64) -> Result<(U256, U256)> {
        reserves::get_pool_reserves_at(self.provider(), pool, block).await
    }

    async fn token_info(&self, token: Address) -> Result<TokenInfo> {
        info::get_token_info(self.provider(), token).await
    }

    async fn get_pair(&self, factory: Address, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        factory::get_pair(self.provider(), factory, token_a, token_b).await
    }
}
