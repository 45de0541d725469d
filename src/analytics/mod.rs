//! Off-chain pool analytics used for annotation and liquidity filtering

pub mod thegraph;

pub use thegraph::*;

use alloy::primitives::Address;
use async_trait::async_trait;
use crate::{errors::QuoterResult, types::PoolAnalytics};

/// Best-effort source of indexed pool statistics. Callers treat every
/// failure as "no analytics" rather than failing the request.
#[async_trait]
pub trait AnalyticsClient: Send + Sync {
    /// `Ok(None)` when the indexer does not know the pool.
    async fn get_pool_data(&self, pool: Address) -> QuoterResult<Option<PoolAnalytics>>;

    /// Pools trading the pair in either token order, largest USD reserve first.
    async fn get_pools_by_token_pair(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> QuoterResult<Vec<PoolAnalytics>>;
}
