//! Process-lifetime caches for immutable chain data

use alloy::primitives::Address;
use std::collections::HashMap;
use tokio::sync::RwLock;
use crate::types::TokenInfo;

/// Token metadata and pair token addresses never change once deployed, so
/// they are fetched once and shared by every request. Concurrent misses may
/// both fetch and insert; the values are identical so the last write wins.
#[derive(Default)]
pub struct ChainCache {
    token_info: RwLock<HashMap<Address, TokenInfo>>,
    pool_tokens: RwLock<HashMap<Address, (Address, Address)>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub tokens: usize,
    pub pools: usize,
}

impl ChainCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn token_info(&self, token: Address) -> Option<TokenInfo> {
        self.token_info.read().await.get(&token).cloned()
    }

    pub async fn insert_token_info(&self, info: TokenInfo) {
        self.token_info.write().await.insert(info.address, info);
    }

    pub async fn pool_tokens(&self, pool: Address) -> Option<(Address, Address)> {
        self.pool_tokens.read().await.get(&pool).copied()
    }

    pub async fn insert_pool_tokens(&self, pool: Address, tokens: (Address, Address)) {
        self.pool_tokens.write().await.insert(pool, tokens);
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            tokens: self.token_info.read().await.len(),
            pools: self.pool_tokens.read().await.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{USDC_MAINNET, WETH_MAINNET};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_token_info_roundtrip() {
        let cache = ChainCache::new();
        assert!(cache.token_info(USDC_MAINNET).await.is_none());

        let info = TokenInfo {
            address: USDC_MAINNET,
            symbol: "USDC".into(),
            decimals: 6,
        };
        cache.insert_token_info(info.clone()).await;
        assert_eq!(cache.token_info(USDC_MAINNET).await, Some(info));
    }

    #[tokio::test]
    async fn test_racing_writers_converge() {
        let cache = Arc::new(ChainCache::new());
        let pool = Address::repeat_byte(0x11);

        let writers: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache.insert_pool_tokens(pool, (USDC_MAINNET, WETH_MAINNET)).await;
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap();
        }

        assert_eq!(cache.pool_tokens(pool).await, Some((USDC_MAINNET, WETH_MAINNET)));
        assert_eq!(cache.stats().await, CacheStats { tokens: 0, pools: 1 });
    }
}
