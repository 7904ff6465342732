//! Environment-derived configuration.
//!
//! Read once at startup and passed into the model; nothing here is global.
//! `MFP_HOST` / `MFP_PORT` override the transport address, `MFP_FEED`
//! overrides the built-in source list as comma-separated `name=url` pairs.

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 6600;

/// A named feed source the user can pick from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub sources: Vec<FeedSource>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("MFP_HOST").ok(),
            std::env::var("MFP_PORT").ok(),
            std::env::var("MFP_FEED").ok(),
        )
    }

    fn from_vars(host: Option<String>, port: Option<String>, feeds: Option<String>) -> Self {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let sources = feeds
            .as_deref()
            .map(parse_feed_list)
            .filter(|list| !list.is_empty())
            .unwrap_or_else(default_sources);

        Self { host, port, sources }
    }
}

fn default_sources() -> Vec<FeedSource> {
    vec![
        FeedSource {
            name: "Music for programming".to_string(),
            url: "https://musicforprogramming.net/rss.xml".to_string(),
        },
        FeedSource {
            name: "YouTube Songs".to_string(),
            url: "https://musicbox.tino.sh/best_songs/music.rss".to_string(),
        },
    ]
}

fn parse_feed_list(raw: &str) -> Vec<FeedSource> {
    raw.split(',')
        .filter_map(|pair| {
            let (name, url) = pair.split_once('=')?;
            let (name, url) = (name.trim(), url.trim());
            if name.is_empty() || url.is_empty() {
                return None;
            }
            Some(FeedSource {
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}
