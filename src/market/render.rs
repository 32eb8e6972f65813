use serde_json::Value;

use super::fetch::MarketSnapshot;
use super::normalize::{bucket_for, classify, Asset, Bucket, Recommendation};
use crate::sink::DashboardSink;

/// One fully formatted table row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRow {
    pub name: String,
    pub price: String,
    pub change: String,
    pub market_cap: String,
    pub recommendation: String,
}

/// One line of the recommendation list.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationLine {
    pub name: String,
    pub symbol: String,
    pub label: String,
}

/// One line of the combined indices/commodities list.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexLine {
    pub label: String,
    pub change: String,
    pub gain: bool,
}

/// Groups the integer part with commas and keeps two decimals when the value
/// is not whole, matching locale-style price output.
fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let int_part = rounded.trunc() as i64;
    let frac_part = rounded - rounded.trunc();

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut out: String = grouped.chars().rev().collect();

    if frac_part > 1e-9 {
        // "0.50" -> ".50"
        out.push_str(&format!("{:.2}", frac_part)[1..]);
    }

    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

pub fn format_price(price: f64) -> String {
    format!("${}", group_thousands(price))
}

pub fn format_percent(change: f64) -> String {
    format!("{:.2}%", change)
}

/// Formats a market cap as `$x.xT` / `$x.xB` / `$x.xM`; unreported or zero
/// caps render as `N/A`.
pub fn format_market_cap(cap: Option<f64>) -> String {
    let cap = match cap {
        Some(v) if v > 0.0 => v,
        _ => return "N/A".to_string(),
    };

    if cap >= 1e12 {
        format!("${:.1}T", cap / 1e12)
    } else if cap >= 1e9 {
        format!("${:.1}B", cap / 1e9)
    } else if cap >= 1e6 {
        format!("${:.1}M", cap / 1e6)
    } else {
        format!("${:.0}", cap)
    }
}

fn asset_row(asset: &Asset) -> AssetRow {
    AssetRow {
        name: asset.name.clone(),
        price: format_price(asset.price),
        change: format_percent(asset.change_percent),
        market_cap: format_market_cap(asset.market_cap),
        recommendation: Recommendation::for_change(asset.change_percent)
            .label()
            .to_string(),
    }
}

/// Splits normalized assets into stock-table and crypto-table rows.
pub fn build_rows(assets: &[Asset]) -> (Vec<AssetRow>, Vec<AssetRow>) {
    let mut stock_rows = Vec::new();
    let mut crypto_rows = Vec::new();

    for asset in assets {
        // The fine-grained class is computed per row but does not drive
        // routing; only the crypto test below does.
        let class = classify(&asset.symbol);
        tracing::debug!(symbol = %asset.symbol, class = ?class, "classified asset");

        let row = asset_row(asset);
        match bucket_for(&asset.symbol) {
            Bucket::Crypto => crypto_rows.push(row),
            Bucket::Stock => stock_rows.push(row),
        }
    }

    (stock_rows, crypto_rows)
}

/// One advice line per asset, same thresholds as the table rows.
pub fn recommendation_lines(assets: &[Asset]) -> Vec<RecommendationLine> {
    assets
        .iter()
        .map(|asset| RecommendationLine {
            name: asset.name.clone(),
            symbol: asset.symbol.clone(),
            label: Recommendation::for_change(asset.change_percent)
                .label()
                .to_string(),
        })
        .collect()
}

/// Builds the combined indices/commodities list, indices first.
///
/// Reads `changesPercentage` straight off the raw records; a missing or
/// non-numeric value becomes `NaN`, which renders as `NaN%` and styles as a
/// loss since `NaN >= 0` is false.
pub fn index_lines(indices: &[Value], commodities: &[Value]) -> Vec<IndexLine> {
    indices
        .iter()
        .chain(commodities)
        .map(|value| {
            let pct = value
                .get("changesPercentage")
                .and_then(Value::as_f64)
                .unwrap_or(f64::NAN);
            let label = value
                .get("name")
                .and_then(Value::as_str)
                .or_else(|| value.get("symbol").and_then(Value::as_str))
                .unwrap_or("")
                .to_string();

            IndexLine {
                label,
                change: format!("{:.2}%", (pct * 100.0).round() / 100.0),
                gain: pct >= 0.0,
            }
        })
        .collect()
}

/// Renders one successful market cycle: both tables, the recommendation list
/// and the indices list, in a single pass. Callers only reach this after the
/// whole snapshot fetched and normalized, so the update is atomic.
pub fn render_market(assets: &[Asset], snapshot: &MarketSnapshot, sink: &mut dyn DashboardSink) {
    let (stock_rows, crypto_rows) = build_rows(assets);
    sink.update_stock_rows(&stock_rows);
    sink.update_crypto_rows(&crypto_rows);
    sink.update_recommendations(&recommendation_lines(assets));
    sink.update_index_lines(&index_lines(&snapshot.indices, &snapshot.commodities));
}
