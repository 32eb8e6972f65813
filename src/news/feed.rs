use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use rss::{Channel, Item};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::image::extract_image;

/// Cards rendered per feed; items past this index are skipped.
pub const MAX_ITEMS_PER_FEED: usize = 4;

/// One rendered news card.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewsCard {
    pub title: String,
    pub link: String,
    pub date: String,
    pub image_url: String,
}

/// Heading plus up to four cards for one feed source.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewsSection {
    pub heading: String,
    pub cards: Vec<NewsCard>,
}

/// Fetches one feed and hands back its parsed channel.
#[async_trait]
pub trait FeedFetch {
    async fn fetch_channel(&self, feed_url: &str) -> Result<Channel>;
}

/// Fetches feeds through the JSON proxy.
///
/// The proxy wraps the upstream document as `{ "contents": "<raw XML>" }`,
/// which sidesteps the feeds' missing CORS headers; the target URL travels
/// URL-encoded in the `url` query parameter.
pub struct NewsFetcher {
    client: reqwest::Client,
    proxy_url: String,
}

impl NewsFetcher {
    pub fn new(client: reqwest::Client, proxy_url: String) -> Self {
        Self { client, proxy_url }
    }
}

#[async_trait]
impl FeedFetch for NewsFetcher {
    async fn fetch_channel(&self, feed_url: &str) -> Result<Channel> {
        let envelope = self
            .client
            .get(&self.proxy_url)
            .query(&[("url", feed_url)])
            .send()
            .await
            .with_context(|| format!("proxy request for {} failed", feed_url))?
            .json::<Value>()
            .await
            .with_context(|| format!("non-JSON proxy envelope for {}", feed_url))?;

        let contents = envelope
            .get("contents")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("proxy envelope missing `contents` for {}", feed_url))?;

        let channel = Channel::read_from(contents.as_bytes())
            .with_context(|| format!("invalid RSS document from {}", feed_url))?;

        Ok(channel)
    }
}

/// Formats an RFC 2822 publish date as `dd/mm/yyyy`. Absent or unparseable
/// dates render the literal `Invalid Date`.
pub fn format_pub_date(raw: Option<&str>) -> String {
    raw.and_then(|s| DateTime::parse_from_rfc2822(s).ok())
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

fn media_content_url(item: &Item) -> Option<String> {
    item.extensions()
        .get("media")?
        .get("content")?
        .iter()
        .find_map(|extension| extension.attrs().get("url").cloned())
}

/// Resolves an item's card image through the fallback chain: inline
/// `<img src>` in the description, then `media:content`, then `enclosure`,
/// then the placeholder.
pub fn resolve_image(item: &Item, placeholder: &str) -> String {
    if let Some(url) = item.description().and_then(extract_image) {
        return url;
    }
    if let Some(url) = media_content_url(item) {
        return url;
    }
    if let Some(enclosure) = item.enclosure() {
        if !enclosure.url().is_empty() {
            return enclosure.url().to_string();
        }
    }
    placeholder.to_string()
}

/// Builds the section for one source: heading plus the first
/// [`MAX_ITEMS_PER_FEED`] items in document order. Missing titles and links
/// become empty strings rather than failing the section.
pub fn section_from_channel(channel: &Channel, label: &str, placeholder: &str) -> NewsSection {
    let cards = channel
        .items()
        .iter()
        .take(MAX_ITEMS_PER_FEED)
        .map(|item| NewsCard {
            title: item.title().unwrap_or("").to_string(),
            link: item.link().unwrap_or("").to_string(),
            date: format_pub_date(item.pub_date()),
            image_url: resolve_image(item, placeholder),
        })
        .collect();

    NewsSection {
        heading: label.to_string(),
        cards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "https://example.com/placeholder.png";

    fn channel_with_items(items: &str) -> Channel {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Flux</title>
    <link>https://example.com</link>
    <description>test feed</description>
    {}
  </channel>
</rss>"#,
            items
        );
        Channel::read_from(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_pub_date_formatting() {
        assert_eq!(
            format_pub_date(Some("Tue, 10 Jun 2025 08:30:00 +0200")),
            "10/06/2025"
        );
        assert_eq!(format_pub_date(Some("not a date")), "Invalid Date");
        assert_eq!(format_pub_date(None), "Invalid Date");
    }

    #[test]
    fn test_image_prefers_inline_img() {
        let channel = channel_with_items(
            r#"<item>
                 <title>A</title>
                 <description>&lt;img src="https://e.com/inline.jpg"&gt;</description>
                 <enclosure url="https://e.com/enclosure.jpg" type="image/jpeg" length="1"/>
               </item>"#,
        );
        let section = section_from_channel(&channel, "Source", PLACEHOLDER);
        assert_eq!(section.cards[0].image_url, "https://e.com/inline.jpg");
    }

    #[test]
    fn test_image_falls_back_to_media_content() {
        let channel = channel_with_items(
            r#"<item>
                 <title>A</title>
                 <description>pas d'image</description>
                 <media:content url="https://e.com/media.jpg" medium="image"/>
               </item>"#,
        );
        let section = section_from_channel(&channel, "Source", PLACEHOLDER);
        assert_eq!(section.cards[0].image_url, "https://e.com/media.jpg");
    }

    #[test]
    fn test_image_falls_back_to_enclosure_then_placeholder() {
        let channel = channel_with_items(
            r#"<item>
                 <title>A</title>
                 <enclosure url="https://e.com/enclosure.jpg" type="image/jpeg" length="1"/>
               </item>
               <item>
                 <title>B</title>
                 <description>rien</description>
               </item>"#,
        );
        let section = section_from_channel(&channel, "Source", PLACEHOLDER);
        assert_eq!(section.cards[0].image_url, "https://e.com/enclosure.jpg");
        assert_eq!(section.cards[1].image_url, PLACEHOLDER);
    }

    #[test]
    fn test_items_capped_at_four_in_document_order() {
        let items: String = (0..10)
            .map(|i| format!("<item><title>Titre {}</title></item>", i))
            .collect();
        let channel = channel_with_items(&items);

        let section = section_from_channel(&channel, "Source", PLACEHOLDER);
        assert_eq!(section.cards.len(), 4);
        let titles: Vec<&str> = section.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Titre 0", "Titre 1", "Titre 2", "Titre 3"]);
    }

    #[test]
    fn test_missing_fields_become_empty_strings() {
        let channel = channel_with_items("<item></item>");
        let section = section_from_channel(&channel, "Source", PLACEHOLDER);
        assert_eq!(section.cards[0].title, "");
        assert_eq!(section.cards[0].link, "");
        assert_eq!(section.cards[0].date, "Invalid Date");
    }
}
