mod config;
mod market;
mod navigation;
mod news;
mod sink;

use config::Config;
use dotenv::dotenv;
use market::{HttpMarketSource, MarketDataSource};
use navigation::{NavigationController, Section};
use news::NewsFetcher;
use sink::{ConsoleSink, DashboardSink};

/// Runs one market cycle and logs a failed one. The dashboard keeps showing
/// the previous cycle's data; the next timer tick is the only retry.
async fn run_market_cycle(source: &dyn MarketDataSource, sink: &mut dyn DashboardSink) {
    if let Err(err) = market::refresh(source, sink).await {
        tracing::error!("market refresh failed: {:#}", err);
    }
}

/// Dashboard entry point.
///
/// Startup flow: show the markets section, run one market cycle immediately,
/// visit the news section once (which triggers the on-demand news cycle),
/// then keep refreshing market data on the fixed period. Awaiting each cycle
/// inside the timer loop means cycles never overlap.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env();
    let client = reqwest::Client::new();
    let source = HttpMarketSource::new(client.clone(), &config);
    let news_fetcher = NewsFetcher::new(client, config.proxy_url.clone());

    let mut sink = ConsoleSink::new();
    let mut nav = NavigationController::new();

    let mut ticker = tokio::time::interval(config.refresh_period);

    nav.activate(Section::Markets, &mut sink);
    ticker.tick().await;
    run_market_cycle(&source, &mut sink).await;

    if nav.activate(Section::News, &mut sink) {
        news::refresh(
            &news_fetcher,
            &config.feeds,
            &config.placeholder_image,
            &mut sink,
        )
        .await;
    }
    nav.activate(Section::Markets, &mut sink);
    tracing::info!("section active: {}", nav.active().title());

    loop {
        ticker.tick().await;
        run_market_cycle(&source, &mut sink).await;
    }
}
