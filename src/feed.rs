//! Feed collaborator: fetches an RSS document and maps it into an ordered
//! list of candidate entries.
//!
//! Locator preference follows the feed convention where the `comments` field
//! carries the playable address; the entry's canonical link is the fallback.

use chrono::{DateTime, Utc};

use crate::errors::AppResult;

/// One raw feed entry, in source order.
#[derive(Clone, Debug)]
pub struct FeedItem {
    pub title: String,
    pub content: String,
    pub locator: String,
    pub published_at: Option<DateTime<Utc>>,
}

pub async fn fetch_feed(url: &str) -> AppResult<Vec<FeedItem>> {
    tracing::debug!(url, "Fetching feed");
    let body = reqwest::get(url).await?.error_for_status()?.bytes().await?;
    let items = parse_feed_bytes(&body)?;
    tracing::info!(url, count = items.len(), "Feed loaded");
    Ok(items)
}

fn map_items(channel: &rss::Channel) -> Vec<FeedItem> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let locator = item
                .comments()
                .or_else(|| item.link())
                .map(str::to_string)?;
            Some(FeedItem {
                title: item.title().unwrap_or("(untitled)").to_string(),
                content: item
                    .content()
                    .or_else(|| item.description())
                    .unwrap_or_default()
                    .to_string(),
                locator,
                published_at: item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|d| d.with_timezone(&Utc)),
            })
        })
        .collect()
}

fn parse_feed_bytes(bytes: &[u8]) -> AppResult<Vec<FeedItem>> {
    let channel = rss::Channel::read_from(bytes)?;
    Ok(map_items(&channel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Music For Programming</title>
    <link>https://musicforprogramming.net</link>
    <description>test feed</description>
    <item>
      <title>Episode 1</title>
      <link>https://musicforprogramming.net/one</link>
      <comments>https://datashat.net/music_for_programming_1.mp3</comments>
      <description>first episode</description>
      <pubDate>Mon, 05 Aug 2024 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Episode 2</title>
      <link>https://musicforprogramming.net/two.mp3</link>
      <description>no comments field</description>
    </item>
    <item>
      <description>neither comments nor link</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn prefers_comments_locator_over_link() {
        let items = parse_feed_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(items[0].locator, "https://datashat.net/music_for_programming_1.mp3");
        assert_eq!(items[0].title, "Episode 1");
        assert!(items[0].published_at.is_some());
    }

    #[test]
    fn falls_back_to_link_and_skips_unplayable() {
        let items = parse_feed_bytes(SAMPLE.as_bytes()).unwrap();
        assert_eq!(items.len(), 2, "entry without any locator is dropped");
        assert_eq!(items[1].locator, "https://musicforprogramming.net/two.mp3");
        assert!(items[1].published_at.is_none());
    }

    #[test]
    fn unparsable_document_is_a_fetch_error() {
        let err = parse_feed_bytes(b"this is not xml").unwrap_err();
        assert!(matches!(err, AppError::Fetch { .. }));
    }
}
