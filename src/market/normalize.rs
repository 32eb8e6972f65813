use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fetch::MarketSnapshot;

/// Symbols routed to the crypto table (matched case-insensitively).
pub const CRYPTO_SYMBOLS: [&str; 10] = [
    "btc", "eth", "usdt", "bnb", "sol", "xrp", "usdc", "ada", "doge", "avax",
];

/// Commodity quote symbols recognised by the classifier.
pub const COMMODITY_SYMBOLS: [&str; 10] = [
    "GCUSD", "SIUSD", "HGUSD", "PLUSD", "PAUSD", "CLUSD", "NGUSD", "BZUSD", "ZCUSD", "ZWUSD",
];

/// A normalized market row.
///
/// Built from whichever field names the source API uses: the crypto provider
/// reports `current_price` / `price_change_percentage_24h` / `market_cap`,
/// the quote provider reports `price` / `changesPercentage` / `marketCap`.
/// Rows only live for one render pass; nothing is persisted.
///
/// # Fields
/// * `name`: display name of the instrument
/// * `symbol`: ticker symbol as reported by the source
/// * `price`: last price in USD, 0 when neither field is present
/// * `change_percent`: 24h change in percent, 0 when neither field is present
/// * `market_cap`: market capitalisation in USD, `None` when unreported
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Asset {
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change_percent: f64,
    pub market_cap: Option<f64>,
}

/// Reads the first non-null numeric field out of `first` then `second`.
fn number_field(value: &Value, first: &str, second: &str) -> Option<f64> {
    value
        .get(first)
        .and_then(Value::as_f64)
        .or_else(|| value.get(second).and_then(Value::as_f64))
}

fn string_field(value: &Value, name: &str) -> String {
    value
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

impl Asset {
    /// Normalizes one raw API record via the field-name fallback chains.
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: string_field(value, "name"),
            symbol: string_field(value, "symbol"),
            price: number_field(value, "current_price", "price").unwrap_or(0.0),
            change_percent: number_field(value, "price_change_percentage_24h", "changesPercentage")
                .unwrap_or(0.0),
            market_cap: number_field(value, "market_cap", "marketCap"),
        }
    }
}

/// Fine-grained asset classification.
///
/// Informational only: table routing is decided by [`bucket_for`], which
/// looks at nothing but the crypto allow-list, so forex, index and commodity
/// rows all end up in the stock table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetClass {
    Crypto,
    Forex,
    Index,
    Commodity,
    Stock,
}

/// The table a row is written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Crypto,
    Stock,
}

fn is_crypto(symbol: &str) -> bool {
    CRYPTO_SYMBOLS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(symbol))
}

/// Classifies a symbol, first match wins.
pub fn classify(symbol: &str) -> AssetClass {
    if is_crypto(symbol) {
        AssetClass::Crypto
    } else if symbol.len() == 6 && symbol.chars().all(|c| c.is_ascii_uppercase()) {
        AssetClass::Forex
    } else if symbol.starts_with('^') {
        AssetClass::Index
    } else if COMMODITY_SYMBOLS.contains(&symbol) {
        AssetClass::Commodity
    } else {
        AssetClass::Stock
    }
}

/// Picks the target table for a symbol. Only the crypto allow-list routes;
/// everything else is a stock-table row regardless of [`classify`].
pub fn bucket_for(symbol: &str) -> Bucket {
    if is_crypto(symbol) {
        Bucket::Crypto
    } else {
        Bucket::Stock
    }
}

/// Buy/sell/hold advice derived from the 24h change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// `> 3` buys, `< -3` sells, everything else holds. The boundaries
    /// themselves hold, and `NaN` fails both comparisons so it holds too.
    pub fn for_change(change_percent: f64) -> Self {
        if change_percent > 3.0 {
            Recommendation::Buy
        } else if change_percent < -3.0 {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Acheter",
            Recommendation::Sell => "Vendre",
            Recommendation::Hold => "Conserver",
        }
    }
}

/// Flattens a snapshot into one normalized sequence: stocks, cryptos, forex,
/// indices, commodities, in that fixed order.
pub fn normalize(snapshot: &MarketSnapshot) -> Vec<Asset> {
    snapshot
        .stocks
        .iter()
        .chain(&snapshot.cryptos)
        .chain(&snapshot.forex)
        .chain(&snapshot.indices)
        .chain(&snapshot.commodities)
        .map(Asset::from_value)
        .collect()
}
