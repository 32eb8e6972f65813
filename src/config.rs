use std::env;
use std::time::Duration;

/// One RSS feed source shown in the news panel.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub label: String,
    pub url: String,
}

/// Runtime configuration for both pipelines.
///
/// Everything has a working default so the binary runs without a `.env` file;
/// the FMP endpoints pick up `FMP_API_KEY` when one is set.
///
/// # Fields
/// * `crypto_url` .. `commodities_url`: the five market-data endpoints
/// * `feeds`: the three RSS sources rendered in the news panel
/// * `proxy_url`: JSON proxy wrapping feed fetches (returns `{ contents }`)
/// * `placeholder_image`: fallback card image when a feed item carries none
/// * `refresh_period`: market refresh period (news refreshes on navigation)
#[derive(Debug, Clone)]
pub struct Config {
    pub crypto_url: String,
    pub stocks_url: String,
    pub forex_url: String,
    pub indices_url: String,
    pub commodities_url: String,
    pub feeds: Vec<FeedSource>,
    pub proxy_url: String,
    pub placeholder_image: String,
    pub refresh_period: Duration,
}

impl Config {
    /// Builds the configuration from environment variables, falling back to
    /// the public demo endpoints.
    pub fn from_env() -> Self {
        let api_key = env::var("FMP_API_KEY").unwrap_or_else(|_| "demo".to_string());
        let quote = |symbols: &str| {
            format!(
                "https://financialmodelingprep.com/api/v3/quote/{}?apikey={}",
                symbols, api_key
            )
        };

        Self {
            crypto_url: "https://api.coingecko.com/api/v3/coins/markets\
                         ?vs_currency=usd&order=market_cap_desc&per_page=10&page=1"
                .to_string(),
            stocks_url: quote("AAPL,MSFT,GOOGL,AMZN,TSLA,META,NVDA,JPM,V,WMT"),
            forex_url: quote("EURUSD,GBPUSD,USDJPY,AUDUSD,USDCAD"),
            indices_url: quote("^GSPC,^DJI,^IXIC,^FCHI,^GDAXI"),
            commodities_url: quote("GCUSD,SIUSD,CLUSD,NGUSD,HGUSD"),
            feeds: vec![
                FeedSource {
                    label: "Les Échos".to_string(),
                    url: "https://services.lesechos.fr/rss/les-echos-finance-marches.xml"
                        .to_string(),
                },
                FeedSource {
                    label: "Boursorama".to_string(),
                    url: "https://www.boursorama.com/rss/actualites/economie.rss".to_string(),
                },
                FeedSource {
                    label: "La Tribune".to_string(),
                    url: "https://www.latribune.fr/rss/rubriques/entreprises-finance.html"
                        .to_string(),
                },
            ],
            proxy_url: "https://api.allorigins.win/get".to_string(),
            placeholder_image: "https://via.placeholder.com/320x180.png?text=Actualites"
                .to_string(),
            refresh_period: Duration::from_millis(1_000_000),
        }
    }
}
