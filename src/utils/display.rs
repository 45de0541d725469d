//! Human-readable result summaries

use num_bigint::BigUint;
use tracing::info;
use crate::types::{DexQuote, QuoteResult};

fn describe_quote(quote: &DexQuote) -> String {
    let mut line = format!(
        "{:<10} {:>24}  pool {}",
        quote.exchange_name, quote.output_amount, quote.pool_address
    );
    if let Some(price) = quote.price {
        line.push_str(&format!("  price {}", price));
    }
    if let Some(pool) = &quote.pool_info {
        line.push_str(&format!(
            "  tvl ${} vol24h ${}{}",
            pool.tvl_usd,
            pool.volume_24h_usd,
            if pool.is_active { "" } else { " (inactive)" }
        ));
    }
    line
}

pub fn print_quote_result(result: &QuoteResult) {
    info!(
        "\n💱 Quote: {} {} -> {} {}",
        result.from_amount.trim(), result.from_token, result.to_amount, result.to_token
    );
    info!("   🏆 Best: {}", describe_quote(&result.best_quote));
    info!("   📊 All quotes ({}):", result.all_quotes.len());
    for quote in &result.all_quotes {
        info!("     {}", describe_quote(quote));
    }
    info!("   🕒 Quoted at {}", result.quoted_at.format("%Y-%m-%d %H:%M:%S UTC"));
}

pub fn print_estimate(pool: &str, src: &str, dst: &str, amount_in: &str, amount_out: &BigUint) {
    info!("\n🔍 Estimate for pool {}", pool);
    info!("   In:  {} base units of {}", amount_in.trim(), src);
    info!("   Out: {} base units of {}", amount_out, dst);
}
