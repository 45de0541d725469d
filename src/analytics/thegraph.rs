//! GraphQL client for a Uniswap V2 style subgraph

use alloy::primitives::Address;
use anyhow::Context;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};
use crate::{
    analytics::AnalyticsClient,
    config::{Config, ANALYTICS_PAIR_LIMIT},
    errors::{QuoterError, QuoterResult},
    types::PoolAnalytics,
};

const PAIR_QUERY: &str = r#"
query GetPair($id: ID!) {
    pair(id: $id) {
        id
        token0 { id symbol }
        token1 { id symbol }
        reserve0
        reserve1
        reserveUSD
        volumeUSD
    }
}"#;

const PAIRS_QUERY: &str = r#"
query GetPairs($token0: String!, $token1: String!, $first: Int!) {
    pairs(
        where: {
            _or: [
                { token0: $token0, token1: $token1 },
                { token0: $token1, token1: $token0 }
            ]
        },
        orderBy: reserveUSD,
        orderDirection: desc,
        first: $first
    ) {
        id
        token0 { id symbol }
        token1 { id symbol }
        reserve0
        reserve1
        reserveUSD
        volumeUSD
    }
}"#;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct PairResponse {
    pair: Option<PairData>,
}

#[derive(Deserialize)]
struct PairsResponse {
    #[serde(default)]
    pairs: Vec<PairData>,
}

#[derive(Deserialize)]
struct TokenRef {
    id: String,
    symbol: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairData {
    id: String,
    token0: TokenRef,
    token1: TokenRef,
    #[serde(default)]
    reserve0: String,
    #[serde(default)]
    reserve1: String,
    #[serde(rename = "reserveUSD", default)]
    reserve_usd: Option<String>,
    #[serde(rename = "volumeUSD", default)]
    volume_usd: Option<String>,
    #[serde(rename = "volumeUSD24h", default)]
    volume_usd_24h: Option<String>,
    #[serde(rename = "feesUSD24h", default)]
    fees_usd_24h: Option<String>,
}

/// Missing or malformed figures read as zero; they only annotate quotes.
fn parse_usd(value: Option<&str>) -> Decimal {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)).ok())
        .unwrap_or_default()
}

impl From<PairData> for PoolAnalytics {
    fn from(pair: PairData) -> Self {
        Self {
            reserve_usd: parse_usd(pair.reserve_usd.as_deref()),
            volume_usd: parse_usd(pair.volume_usd.as_deref()),
            volume_24h_usd: parse_usd(pair.volume_usd_24h.as_deref()),
            fees_24h_usd: parse_usd(pair.fees_usd_24h.as_deref()),
            id: pair.id,
            token0: pair.token0.id,
            token1: pair.token1.id,
            token0_symbol: pair.token0.symbol,
            token1_symbol: pair.token1.symbol,
            reserve0: pair.reserve0,
            reserve1: pair.reserve1,
        }
    }
}

/// Subgraph ids are lower-case hex addresses
fn subgraph_id(address: Address) -> String {
    address.to_string().to_lowercase()
}

pub struct TheGraphClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TheGraphClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> QuoterResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoterError::Network {
                message: "Failed to build HTTP client".to_string(),
                source: Some(e.into()),
                retry_count: 0,
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// `None` when no subgraph endpoint is configured
    pub fn from_config(config: &Config) -> QuoterResult<Option<Self>> {
        config
            .graph_url
            .as_deref()
            .map(|url| Self::new(url, Duration::from_secs(config.graph_timeout_secs)))
            .transpose()
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> QuoterResult<T> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .context("GraphQL request failed")
            .map_err(|e| QuoterError::Network {
                message: format!("Subgraph request to {} failed", self.endpoint),
                source: Some(e),
                retry_count: 0,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("⚠️ Subgraph returned error status {}: {}", status, body);
            return Err(QuoterError::Network {
                message: format!("Subgraph returned status {}", status),
                source: Some(anyhow::anyhow!("{}", body)),
                retry_count: 0,
            });
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| QuoterError::data_parsing("GraphQL response", e))?;

        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(QuoterError::data_parsing(
                "GraphQL errors",
                anyhow::anyhow!("{}", messages.join("; ")),
            ));
        }

        body.data
            .ok_or_else(|| QuoterError::data_parsing("GraphQL response", anyhow::anyhow!("missing data")))
    }
}

#[async_trait]
impl AnalyticsClient for TheGraphClient {
    async fn get_pool_data(&self, pool: Address) -> QuoterResult<Option<PoolAnalytics>> {
        let response: PairResponse = self
            .execute(PAIR_QUERY, json!({ "id": subgraph_id(pool) }))
            .await?;

        if response.pair.is_none() {
            debug!(pool = %pool, "Pool not indexed");
        }
        Ok(response.pair.map(PoolAnalytics::from))
    }

    async fn get_pools_by_token_pair(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> QuoterResult<Vec<PoolAnalytics>> {
        let variables = json!({
            "token0": subgraph_id(token_a),
            "token1": subgraph_id(token_b),
            "first": ANALYTICS_PAIR_LIMIT,
        });
        let response: PairsResponse = self.execute(PAIRS_QUERY, variables).await?;

        let mut pools: Vec<PoolAnalytics> = response.pairs.into_iter().map(PoolAnalytics::from).collect();
        pools.sort_by(|a, b| b.reserve_usd.cmp(&a.reserve_usd));
        pools.truncate(ANALYTICS_PAIR_LIMIT);

        debug!(count = pools.len(), "Fetched pair analytics");
        Ok(pools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::types::{USDC_MAINNET, WETH_MAINNET};
    use mockito::Matcher;
    use rust_decimal_macros::dec;

    fn pair_json(id: &str, reserve_usd: &str) -> serde_json::Value {
        json!({
            "id": id,
            "token0": { "id": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "symbol": "USDC" },
            "token1": { "id": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "symbol": "WETH" },
            "reserve0": "51234567.123456",
            "reserve1": "20345.5",
            "reserveUSD": reserve_usd,
            "volumeUSD": "1000000.5"
        })
    }

    fn client(server: &mockito::ServerGuard) -> TheGraphClient {
        TheGraphClient::new(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_pool_data_sends_lowercase_id() {
        let mut server = mockito::Server::new_async().await;
        let pool: Address = "0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc".parse().unwrap();
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "id": "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "data": { "pair": pair_json("0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc", "98765432.129") } }).to_string())
            .create_async()
            .await;

        let data = client(&server).get_pool_data(pool).await.unwrap().unwrap();
        mock.assert_async().await;

        assert_eq!(data.token0_symbol, "USDC");
        assert_eq!(data.reserve_usd, dec!(98765432.129));
        assert_eq!(data.volume_usd, dec!(1000000.5));
        assert_eq!(data.volume_24h_usd, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_pool_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"data":{"pair":null}}"#)
            .create_async()
            .await;

        let data = client(&server).get_pool_data(Address::repeat_byte(0x42)).await.unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_pair_query_sorted_and_capped() {
        let mut server = mockito::Server::new_async().await;
        let pairs: Vec<_> = (0..12)
            .map(|i| pair_json(&format!("0x{:040x}", i), &format!("{}.5", i * 100)))
            .collect();
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(json!({ "data": { "pairs": pairs } }).to_string())
            .create_async()
            .await;

        let pools = client(&server)
            .get_pools_by_token_pair(USDC_MAINNET, WETH_MAINNET)
            .await
            .unwrap();

        assert_eq!(pools.len(), ANALYTICS_PAIR_LIMIT);
        assert_eq!(pools[0].reserve_usd, dec!(1100.5));
        assert!(pools.windows(2).all(|w| w[0].reserve_usd >= w[1].reserve_usd));
    }

    #[tokio::test]
    async fn test_graphql_errors_surface() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"errors":[{"message":"Type `Pair` has no field `foo`"}]}"#)
            .create_async()
            .await;

        let err = client(&server)
            .get_pools_by_token_pair(USDC_MAINNET, WETH_MAINNET)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = client(&server).get_pool_data(USDC_MAINNET).await.unwrap_err();
        assert!(matches!(err, QuoterError::Network { .. }));
    }

    #[test]
    fn test_parse_usd_fallbacks() {
        assert_eq!(parse_usd(Some("12.345")), dec!(12.345));
        assert_eq!(parse_usd(Some("1e3")), dec!(1000));
        assert_eq!(parse_usd(Some("not a number")), Decimal::ZERO);
        assert_eq!(parse_usd(Some("")), Decimal::ZERO);
        assert_eq!(parse_usd(None), Decimal::ZERO);
    }

    #[test]
    fn test_from_config_without_url() {
        assert!(TheGraphClient::from_config(&Config::default()).unwrap().is_none());
    }
}
