// Source aggregation: the two text collections and which of them feed scoring.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{CloudError, Result};
use crate::twitter::traits::SocialClient;

/// Which collections feed the word counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TextSource {
    /// The user's own posts
    #[value(alias = "tweets")]
    Posts,
    /// Direct messages the user sent
    #[value(alias = "dms")]
    Messages,
    /// Posts followed by messages
    #[default]
    Both,
}

impl FromStr for TextSource {
    type Err = CloudError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "posts" | "tweets" => Ok(Self::Posts),
            "messages" | "dms" => Ok(Self::Messages),
            "both" => Ok(Self::Both),
            other => Err(CloudError::Configuration(format!(
                "unknown text source '{other}' (expected posts, messages or both)"
            ))),
        }
    }
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Posts => "posts",
            Self::Messages => "messages",
            Self::Both => "both",
        };
        f.write_str(name)
    }
}

/// Owns the fetched posts and messages.
///
/// Each collection starts empty and is either replaced or extended by every
/// fetch; nothing else mutates it. A failed fetch leaves it as it was.
#[derive(Debug, Clone, Default)]
pub struct SourceAggregator {
    posts: Vec<String>,
    messages: Vec<String>,
}

impl SourceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[String] {
        &self.posts
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Replace (`overwrite`) or extend the posts collection.
    pub fn store_posts(&mut self, texts: Vec<String>, overwrite: bool) {
        store(&mut self.posts, texts, overwrite);
    }

    /// Replace (`overwrite`) or extend the messages collection.
    pub fn store_messages(&mut self, texts: Vec<String>, overwrite: bool) {
        store(&mut self.messages, texts, overwrite);
    }

    /// Fetch posts through `client` and store them. Returns the fetched batch.
    pub async fn fetch_posts<C: SocialClient + ?Sized>(
        &mut self,
        client: &C,
        screen_name: Option<&str>,
        max_count: usize,
        overwrite: bool,
    ) -> Result<Vec<String>> {
        let fetched = client.fetch_user_posts(screen_name, max_count).await?;
        debug!(fetched = fetched.len(), overwrite, "Storing posts");
        self.store_posts(fetched.clone(), overwrite);
        Ok(fetched)
    }

    /// Fetch sent messages through `client` and store them. Returns the fetched batch.
    pub async fn fetch_messages<C: SocialClient + ?Sized>(
        &mut self,
        client: &C,
        max_count: usize,
        overwrite: bool,
    ) -> Result<Vec<String>> {
        let fetched = client.fetch_sent_messages(max_count).await?;
        debug!(fetched = fetched.len(), overwrite, "Storing messages");
        self.store_messages(fetched.clone(), overwrite);
        Ok(fetched)
    }

    /// The texts selected by `source`, posts before messages for `Both`.
    pub fn texts(&self, source: TextSource) -> Vec<&str> {
        let posts = self.posts.iter().map(String::as_str);
        let messages = self.messages.iter().map(String::as_str);
        match source {
            TextSource::Posts => posts.collect(),
            TextSource::Messages => messages.collect(),
            TextSource::Both => posts.chain(messages).collect(),
        }
    }
}

fn store(collection: &mut Vec<String>, texts: Vec<String>, overwrite: bool) {
    if overwrite {
        *collection = texts;
    } else {
        collection.extend(texts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn starts_empty() {
        let agg = SourceAggregator::new();
        assert!(agg.posts().is_empty());
        assert!(agg.messages().is_empty());
        assert!(agg.texts(TextSource::Both).is_empty());
    }

    #[test]
    fn overwrite_replaces_and_append_extends() {
        let mut agg = SourceAggregator::new();
        agg.store_posts(strings(&["a", "b"]), true);
        agg.store_posts(strings(&["c"]), false);
        assert_eq!(agg.posts(), strings(&["a", "b", "c"]).as_slice());

        agg.store_posts(strings(&["d"]), true);
        assert_eq!(agg.posts(), strings(&["d"]).as_slice());
    }

    #[test]
    fn both_is_posts_then_messages() {
        let mut agg = SourceAggregator::new();
        agg.store_posts(strings(&["p1", "p2"]), true);
        agg.store_messages(strings(&["m1"]), true);
        assert_eq!(agg.texts(TextSource::Posts), vec!["p1", "p2"]);
        assert_eq!(agg.texts(TextSource::Messages), vec!["m1"]);
        assert_eq!(agg.texts(TextSource::Both), vec!["p1", "p2", "m1"]);
    }

    #[test]
    fn parses_source_names_including_legacy_ones() {
        assert_eq!("tweets".parse::<TextSource>().unwrap(), TextSource::Posts);
        assert_eq!("DMs".parse::<TextSource>().unwrap(), TextSource::Messages);
        assert_eq!("both".parse::<TextSource>().unwrap(), TextSource::Both);
        assert!(matches!(
            "everything".parse::<TextSource>(),
            Err(CloudError::Configuration(_))
        ));
        assert_eq!(TextSource::Messages.to_string(), "messages");
    }
}
