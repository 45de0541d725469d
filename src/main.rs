//! DEX Quoter - Main Entry Point

use clap::{Parser, Subcommand};
use dex_quoter::{
    analytics::{AnalyticsClient, TheGraphClient},
    network::RequestContext,
    pools::{ChainCache, ChainClient, EthereumClient},
    *,
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dex-quoter", version, about = "Best-price quotes across constant-product DEX pools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Best output across all venues for a whole-unit amount
    Quote {
        /// Source token symbol (e.g. ETH, USDC)
        from: String,
        /// Destination token symbol
        to: String,
        /// Whole units of the source token
        amount: String,
    },
    /// Output of a single pool for an amount in base units
    Estimate {
        #[arg(long)]
        pool: String,
        #[arg(long)]
        src: String,
        #[arg(long)]
        dst: String,
        #[arg(long)]
        amount: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    utils::setup_output_directories()?;
    let _logging_guard = utils::setup_logging()?;

    // Load configuration
    let config = CONFIG.clone();

    info!("💱 DEX Quoter v{}", env!("CARGO_PKG_VERSION"));
    info!("📋 Configuration:");
    info!("   RPC: {}", config.rpc_url);
    info!("   Analytics: {}", config.graph_url.as_deref().unwrap_or("disabled"));
    info!("   Min TVL: ${}", config.min_tvl_usd);
    info!("   Request timeout: {}s", config.request_timeout_secs);

    // Setup network providers
    let provider = network::setup_mainnet_provider(&config).await?;
    let cache = Arc::new(ChainCache::new());
    let chain: Arc<dyn ChainClient> =
        Arc::new(EthereumClient::from_config(provider, cache.clone(), &config));
    let analytics: Option<Arc<dyn AnalyticsClient>> = TheGraphClient::from_config(&config)?
        .map(|client| Arc::new(client) as Arc<dyn AnalyticsClient>);

    // Ctrl+C cancels the in-flight request
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("🛑 Interrupt received, cancelling request...");
            signal_token.cancel();
        }
    });
    let ctx = RequestContext::new(shutdown)
        .with_timeout(Duration::from_secs(config.request_timeout_secs));

    match cli.command {
        Command::Quote { from, to, amount } => {
            let aggregator = QuoteAggregator::from_config(chain, analytics, &config);
            info!("   Tokens: ETH, {}", aggregator.registry().symbols().join(", "));
            let result = aggregator.quote(&ctx, &from, &to, &amount).await?;
            utils::print_quote_result(&result);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Estimate { pool, src, dst, amount } => {
            let estimator = PoolEstimator::new(chain);
            let amount_out = estimator.estimate(&ctx, &pool, &src, &dst, &amount).await?;
            utils::print_estimate(&pool, &src, &dst, &amount, &amount_out);
            println!(
                "{}",
                serde_json::json!({
                    "pool": pool,
                    "src": src,
                    "dst": dst,
                    "src_amount": amount.trim(),
                    "dst_amount": amount_out.to_string(),
                })
            );
        }
    }

    let stats = cache.stats().await;
    info!("🗄️  Cached {} tokens, {} pools", stats.tokens, stats.pools);

    Ok(())
}
