pub mod feed;
pub mod image;

pub use feed::{FeedFetch, NewsFetcher, NewsSection};

use crate::config::FeedSource;
use crate::sink::DashboardSink;
use anyhow::Result;

/// Message shown in place of the news panel when any feed fails.
pub const NEWS_ERROR_MESSAGE: &str = "Impossible de charger les actualités.";

/// Runs one news cycle: every feed is fetched and parsed sequentially, each
/// one fully resolved before the next starts. The sink is only written on
/// full success; any failure discards the sections already built and shows a
/// single generic error instead.
pub async fn refresh<F: FeedFetch + ?Sized>(
    fetcher: &F,
    feeds: &[FeedSource],
    placeholder_image: &str,
    sink: &mut dyn DashboardSink,
) {
    match build_sections(fetcher, feeds, placeholder_image).await {
        Ok(sections) => sink.update_news(&sections),
        Err(err) => {
            tracing::error!("news refresh failed: {:#}", err);
            sink.show_news_error(NEWS_ERROR_MESSAGE);
        }
    }
}

async fn build_sections<F: FeedFetch + ?Sized>(
    fetcher: &F,
    feeds: &[FeedSource],
    placeholder_image: &str,
) -> Result<Vec<NewsSection>> {
    let mut sections = Vec::with_capacity(feeds.len());

    for source in feeds {
        let channel = fetcher.fetch_channel(&source.url).await?;
        sections.push(feed::section_from_channel(
            &channel,
            &source.label,
            placeholder_image,
        ));
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use rss::Channel;

    struct ScriptedFetcher {
        /// URLs that fail; every other URL yields a two-item channel.
        failing: Vec<String>,
    }

    #[async_trait]
    impl FeedFetch for ScriptedFetcher {
        async fn fetch_channel(&self, feed_url: &str) -> anyhow::Result<Channel> {
            if self.failing.iter().any(|url| url == feed_url) {
                return Err(anyhow!("proxy request for {} failed", feed_url));
            }
            let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>t</title><link>l</link><description>d</description>
  <item><title>Un</title><link>https://e.com/1</link></item>
  <item><title>Deux</title><link>https://e.com/2</link></item>
</channel></rss>"#;
            Ok(Channel::read_from(xml.as_bytes())?)
        }
    }

    fn sources(urls: &[&str]) -> Vec<FeedSource> {
        urls.iter()
            .map(|url| FeedSource {
                label: format!("Source {}", url),
                url: url.to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_sections_built_in_source_order() {
        let fetcher = ScriptedFetcher { failing: vec![] };
        let feeds = sources(&["https://a", "https://b"]);
        let mut sink = RecordingSink::default();

        refresh(&fetcher, &feeds, "https://ph.png", &mut sink).await;

        assert!(sink.news_error.is_none());
        assert_eq!(sink.news.len(), 2);
        assert_eq!(sink.news[0].heading, "Source https://a");
        assert_eq!(sink.news[0].cards.len(), 2);
        assert_eq!(sink.news[1].heading, "Source https://b");
    }

    #[tokio::test]
    async fn test_one_failure_discards_earlier_sections() {
        // First feed succeeds, second fails: nothing from the first feed may
        // reach the sink, only the generic error.
        let fetcher = ScriptedFetcher {
            failing: vec!["https://b".to_string()],
        };
        let feeds = sources(&["https://a", "https://b", "https://c"]);
        let mut sink = RecordingSink::default();

        refresh(&fetcher, &feeds, "https://ph.png", &mut sink).await;

        assert!(sink.news.is_empty());
        assert_eq!(sink.news_error.as_deref(), Some(NEWS_ERROR_MESSAGE));
    }
}
