use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;

/// Raw payloads of one market cycle, one entry per provider response record.
///
/// Records stay as untyped JSON: the two provider shapes are reconciled later
/// by the normalizer's field-name fallback, not by typed deserialization.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    pub stocks: Vec<Value>,
    pub cryptos: Vec<Value>,
    pub forex: Vec<Value>,
    pub indices: Vec<Value>,
    pub commodities: Vec<Value>,
}

/// Source of one full market snapshot.
///
/// The production implementation is [`HttpMarketSource`]; tests substitute a
/// canned source so cycles run without a network.
#[async_trait]
pub trait MarketDataSource {
    /// Fetches all five payloads for one cycle. Any request, parse or shape
    /// failure fails the whole snapshot; there is no partial result.
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot>;
}

/// Fetches the five provider endpoints over HTTP.
pub struct HttpMarketSource {
    client: reqwest::Client,
    crypto_url: String,
    stocks_url: String,
    forex_url: String,
    indices_url: String,
    commodities_url: String,
}

impl HttpMarketSource {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            crypto_url: config.crypto_url.clone(),
            stocks_url: config.stocks_url.clone(),
            forex_url: config.forex_url.clone(),
            indices_url: config.indices_url.clone(),
            commodities_url: config.commodities_url.clone(),
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let value = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .json::<Value>()
            .await
            .with_context(|| format!("non-JSON body from {}", url))?;

        Ok(value)
    }
}

/// The stock and crypto payloads must be arrays; a different shape fails the
/// cycle. The remaining payloads degrade to empty sequences instead.
fn require_array(value: Value, what: &str) -> Result<Vec<Value>> {
    value
        .as_array()
        .cloned()
        .ok_or_else(|| anyhow!("{} response is not an array", what))
}

fn array_or_empty(value: Value) -> Vec<Value> {
    value.as_array().cloned().unwrap_or_default()
}

#[async_trait]
impl MarketDataSource for HttpMarketSource {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        // All five requests run concurrently; the first rejection aborts the
        // join and therefore the cycle.
        let (cryptos, stocks, forex, indices, commodities) = tokio::try_join!(
            self.get_json(&self.crypto_url),
            self.get_json(&self.stocks_url),
            self.get_json(&self.forex_url),
            self.get_json(&self.indices_url),
            self.get_json(&self.commodities_url),
        )?;

        Ok(MarketSnapshot {
            stocks: require_array(stocks, "stock quote")?,
            cryptos: require_array(cryptos, "crypto market")?,
            forex: array_or_empty(forex),
            indices: array_or_empty(indices),
            commodities: array_or_empty(commodities),
        })
    }
}
