// Post fetching: the user timeline, minus retweets and other authors.

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::client::TwitterClient;
use crate::error::Result;

/// The timeline endpoint returns at most this many items per call.
pub const MAX_TIMELINE_COUNT: usize = 200;

/// A timeline item, reduced to what the word counter needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub text: String,
    pub user: TweetAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TweetAuthor {
    pub screen_name: String,
}

/// Keep tweets written by `screen_name` that are not retweets.
///
/// Retweets are recognized by the `RT` prefix the API puts on their text.
/// Screen names compare case-insensitively, as Twitter treats them.
pub fn authored_texts(tweets: Vec<Tweet>, screen_name: &str) -> Vec<String> {
    tweets
        .into_iter()
        .filter(|t| t.user.screen_name.eq_ignore_ascii_case(screen_name))
        .filter(|t| !t.text.starts_with("RT"))
        .map(|t| t.text)
        .collect()
}

/// The `count` sent to the timeline endpoint for `max_posts`.
///
/// A single request is made, so anything above [`MAX_TIMELINE_COUNT`] is
/// capped there with a warning.
pub fn timeline_count(max_posts: usize) -> usize {
    if max_posts > MAX_TIMELINE_COUNT {
        warn!(
            requested = max_posts,
            cap = MAX_TIMELINE_COUNT,
            "Timeline requests are capped at {} posts",
            MAX_TIMELINE_COUNT
        );
    }
    max_posts.min(MAX_TIMELINE_COUNT)
}

/// Fetch up to `max_posts` recent posts by `screen_name`.
///
/// `max_posts` bounds the timeline request (at most [`MAX_TIMELINE_COUNT`]);
/// filtering can leave fewer.
pub async fn fetch_user_posts(
    client: &TwitterClient,
    screen_name: &str,
    max_posts: usize,
) -> Result<Vec<String>> {
    if max_posts == 0 {
        return Ok(Vec::new());
    }

    let count = timeline_count(max_posts).to_string();
    let tweets: Vec<Tweet> = client
        .get(
            "statuses/user_timeline.json",
            &[("screen_name", screen_name), ("count", &count)],
        )
        .await?;

    debug!(fetched = tweets.len(), "Fetched timeline page for @{}", screen_name);

    let texts = authored_texts(tweets, screen_name);

    info!(count = texts.len(), screen_name = screen_name, "Collected posts");

    Ok(texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_timeline_and_filters() {
        let json = r#"[
            {"id_str": "1", "text": "Original thought", "user": {"screen_name": "alice", "id_str": "10"}},
            {"id_str": "2", "text": "RT @bob: something bob said", "user": {"screen_name": "alice", "id_str": "10"}},
            {"id_str": "3", "text": "Someone else", "user": {"screen_name": "bob", "id_str": "11"}},
            {"id_str": "4", "text": "Another one", "user": {"screen_name": "Alice", "id_str": "10"}}
        ]"#;
        let tweets: Vec<Tweet> = serde_json::from_str(json).unwrap();
        let texts = authored_texts(tweets, "alice");
        assert_eq!(texts, vec!["Original thought", "Another one"]);
    }

    #[test]
    fn timeline_count_caps_at_endpoint_limit() {
        assert_eq!(timeline_count(20), 20);
        assert_eq!(timeline_count(MAX_TIMELINE_COUNT), MAX_TIMELINE_COUNT);
        assert_eq!(timeline_count(500), MAX_TIMELINE_COUNT);
    }
}
