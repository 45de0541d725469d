//! Multi-venue quote aggregation

use alloy::primitives::Address;
use chrono::Utc;
use futures::future::join_all;
use num_bigint::BigUint;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;
use crate::{
    amm::{parse_amount, to_base_units, to_display_units, unit_price},
    analytics::AnalyticsClient,
    config::Config,
    errors::{QuoterError, QuoterResult},
    network::RequestContext,
    pools::{passes_liquidity_floor, ChainClient},
    tokens::TokenRegistry,
    types::{DexQuote, PoolAnalytics, PoolSummary, QuoteResult, TokenInfo, VenuePool},
};

/// A pool that produced an output for the requested input
struct PoolOutput<'a> {
    pool: &'a VenuePool,
    amount_out: BigUint,
}

/// Index of the strictly largest output; the earliest entry wins ties.
fn best_index(outputs: &[PoolOutput<'_>]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, output) in outputs.iter().enumerate() {
        match best {
            Some(b) if output.amount_out <= outputs[b].amount_out => {}
            _ => best = Some(i),
        }
    }
    best
}

pub struct QuoteAggregator {
    chain: Arc<dyn ChainClient>,
    analytics: Option<Arc<dyn AnalyticsClient>>,
    registry: TokenRegistry,
    min_tvl_usd: Decimal,
}

impl QuoteAggregator {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        analytics: Option<Arc<dyn AnalyticsClient>>,
        registry: TokenRegistry,
        min_tvl_usd: Decimal,
    ) -> Self {
        Self {
            chain,
            analytics,
            registry,
            min_tvl_usd,
        }
    }

    pub fn from_config(
        chain: Arc<dyn ChainClient>,
        analytics: Option<Arc<dyn AnalyticsClient>>,
        config: &Config,
    ) -> Self {
        Self::new(chain, analytics, TokenRegistry::mainnet(), config.min_tvl_usd)
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Best output across every known venue for `amount` whole units of `from`.
    ///
    /// Individual pools that fail or sit below the liquidity floor are left
    /// out; the call only fails when no pool exists or none could be quoted.
    pub async fn quote(
        &self,
        ctx: &RequestContext,
        from: &str,
        to: &str,
        amount: &str,
    ) -> QuoterResult<QuoteResult> {
        let request_id = Uuid::new_v4();
        let span = info_span!("quote", %request_id, from, to);

        async {
            let display_in = parse_amount(amount)?;
            let from_address = self.registry.resolve(from)?;
            let to_address = self.registry.resolve(to)?;
            if from_address == to_address {
                return Err(QuoterError::IdenticalTokens { token: from_address });
            }

            ctx.run(self.aggregate(from, to, amount, from_address, to_address, display_in))
                .await
        }
        .instrument(span)
        .await
    }

    async fn aggregate(
        &self,
        from: &str,
        to: &str,
        amount: &str,
        from_address: Address,
        to_address: Address,
        display_in: BigUint,
    ) -> QuoterResult<QuoteResult> {
        let (from_info, to_info) = tokio::try_join!(
            self.chain.get_token_info(from_address),
            self.chain.get_token_info(to_address),
        )?;
        let amount_in = to_base_units(&display_in, from_info.decimals);

        let pools = self.chain.find_all_pools(from_address, to_address).await?;
        if pools.is_empty() {
            return Err(QuoterError::NoLiquidity {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        debug!(count = pools.len(), "Discovered pools");

        let analytics = self.collect_analytics(&pools, from_address, to_address).await;

        let candidates: Vec<&VenuePool> = pools
            .iter()
            .filter(|pool| {
                let passes = passes_liquidity_floor(analytics.get(&pool.address), self.min_tvl_usd);
                if !passes {
                    info!(
                        venue = %pool.venue,
                        pool = %pool.address,
                        min_tvl_usd = %self.min_tvl_usd,
                        "Pool below liquidity floor, excluded"
                    );
                }
                passes
            })
            .collect();

        let lookups = candidates.iter().map(|pool| {
            let amount_in = &amount_in;
            async move {
                (
                    *pool,
                    self.chain.get_quote_for_pool(pool.address, from_address, amount_in).await,
                )
            }
        });

        let mut outputs = Vec::with_capacity(candidates.len());
        for (pool, result) in join_all(lookups).await {
            match result {
                Ok(amount_out) => outputs.push(PoolOutput { pool, amount_out }),
                Err(e) => warn!(
                    venue = %pool.venue,
                    pool = %pool.address,
                    error = %e,
                    "Quote failed, skipping pool"
                ),
            }
        }

        let Some(best) = best_index(&outputs) else {
            return Err(QuoterError::NoQuotesAvailable {
                from: from.to_string(),
                to: to.to_string(),
                pools_checked: pools.len(),
            });
        };

        let all_quotes: Vec<DexQuote> = outputs
            .iter()
            .map(|output| self.build_quote(output, &to_info, &display_in, &analytics))
            .collect();
        let best_quote = all_quotes[best].clone();

        info!(
            "💱 {} {} -> {} {} via {} ({} of {} pools quoted)",
            display_in,
            from_info.symbol,
            best_quote.output_amount,
            to_info.symbol,
            best_quote.exchange_name,
            all_quotes.len(),
            pools.len()
        );

        Ok(QuoteResult {
            from_token: from.to_string(),
            to_token: to.to_string(),
            from_address,
            to_address,
            from_amount: amount.to_string(),
            to_amount: best_quote.output_amount.clone(),
            best_quote,
            all_quotes,
            quoted_at: Utc::now(),
        })
    }

    fn build_quote(
        &self,
        output: &PoolOutput<'_>,
        to_info: &TokenInfo,
        display_in: &BigUint,
        analytics: &HashMap<Address, PoolAnalytics>,
    ) -> DexQuote {
        DexQuote {
            exchange_name: output.pool.venue.clone(),
            pool_address: output.pool.address,
            output_amount: to_display_units(&output.amount_out, to_info.decimals).to_string(),
            output_base_units: output.amount_out.clone(),
            price: unit_price(&output.amount_out, to_info.decimals, display_in),
            pool_info: analytics
                .get(&output.pool.address)
                .map(|data| PoolSummary::from_analytics(data, self.min_tvl_usd)),
        }
    }

    /// Analytics keyed by pool address. One pair-level query first, then a
    /// per-pool lookup for anything it missed. Failures only drop annotations.
    async fn collect_analytics(
        &self,
        pools: &[VenuePool],
        token_a: Address,
        token_b: Address,
    ) -> HashMap<Address, PoolAnalytics> {
        let mut by_pool = HashMap::new();
        let Some(analytics) = self.analytics.as_ref() else {
            return by_pool;
        };

        match analytics.get_pools_by_token_pair(token_a, token_b).await {
            Ok(indexed) => {
                for data in indexed {
                    let Ok(address) = Address::from_str(&data.id) else {
                        debug!(id = %data.id, "Ignoring analytics entry with malformed id");
                        continue;
                    };
                    if pools.iter().any(|pool| pool.address == address) {
                        by_pool.entry(address).or_insert(data);
                    }
                }
            }
            Err(e) => warn!(error = %e, "Pair analytics unavailable"),
        }

        let lookups = pools
            .iter()
            .map(|pool| pool.address)
            .filter(|address| !by_pool.contains_key(address))
            .map(|address| async move { (address, analytics.get_pool_data(address).await) })
            .collect::<Vec<_>>();

        for (address, result) in join_all(lookups).await {
            match result {
                Ok(Some(data)) => {
                    by_pool.insert(address, data);
                }
                Ok(None) => debug!(pool = %address, "No analytics for pool"),
                Err(e) => warn!(pool = %address, error = %e, "Pool analytics lookup failed"),
            }
        }

        by_pool
    }
}
