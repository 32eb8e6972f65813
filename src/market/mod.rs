pub mod fetch;
pub mod normalize;
pub mod render;

pub use fetch::{HttpMarketSource, MarketDataSource, MarketSnapshot};
pub use normalize::{normalize, Asset, Recommendation};

use crate::sink::DashboardSink;
use anyhow::Result;

/// Runs one market cycle: fetch all five payloads, normalize, render.
///
/// Every sink write happens after the whole snapshot has fetched and
/// normalized, so a failing cycle leaves the previous render untouched and
/// the caller just logs the error until the next scheduled cycle.
pub async fn refresh<S: MarketDataSource + ?Sized>(
    source: &S,
    sink: &mut dyn DashboardSink,
) -> Result<()> {
    let snapshot = source.fetch_snapshot().await?;
    let assets = normalize(&snapshot);
    render::render_market(&assets, &snapshot, sink);
    Ok(())
}
