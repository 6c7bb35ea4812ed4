// TweetCloud: one user's posts and messages, the stop words to filter them
// with, and the operations that turn them into word counts and images.
//
// Generic over the SocialClient so the whole flow runs against an in-memory
// fake in tests.

use std::path::Path;

use tracing::info;

use crate::config::Credentials;
use crate::error::Result;
use crate::render::show_image;
use crate::render::spec::WordCloudSpec;
use crate::render::traits::Renderer;
use crate::source::{SourceAggregator, TextSource};
use crate::text::{
    join_texts, normalize, score, select_top, FrequencyTable, SelectionOrder, StopwordSet,
};
use crate::twitter::client::TwitterClient;
use crate::twitter::traits::SocialClient;

/// Result of [`TweetCloud::count_words`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCounts {
    /// Every scored word, in first-seen order
    pub all: FrequencyTable,
    /// At most `max_words` entries, ordered per the requested policy
    pub selected: FrequencyTable,
}

pub struct TweetCloud<C: SocialClient> {
    client: C,
    sources: SourceAggregator,
    stopwords: StopwordSet,
}

impl TweetCloud<TwitterClient> {
    /// Authenticate against the Twitter API and start with empty collections.
    pub async fn connect(
        credentials: &Credentials,
        api_url: &str,
        stopwords: StopwordSet,
    ) -> Result<Self> {
        let client = TwitterClient::authenticate(credentials, api_url).await?;
        Ok(Self::new(client, stopwords))
    }

    /// Switch to another account's credentials, keeping what was already fetched.
    ///
    /// Library API only; each CLI run authenticates once. On failure the
    /// current client stays in place.
    pub async fn reauthenticate(
        &mut self,
        credentials: &Credentials,
        api_url: &str,
    ) -> Result<()> {
        let client = TwitterClient::authenticate(credentials, api_url).await?;
        self.replace_client(client);
        Ok(())
    }
}

impl<C: SocialClient> TweetCloud<C> {
    pub fn new(client: C, stopwords: StopwordSet) -> Self {
        Self {
            client,
            sources: SourceAggregator::new(),
            stopwords,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Swap in another client. Fetched collections and stop words are kept.
    pub fn replace_client(&mut self, client: C) -> C {
        info!(
            from = %self.client.screen_name(),
            to = %client.screen_name(),
            "Switching account"
        );
        std::mem::replace(&mut self.client, client)
    }

    /// Screen name of the authenticated user.
    pub fn screen_name(&self) -> &str {
        self.client.screen_name()
    }

    pub fn sources(&self) -> &SourceAggregator {
        &self.sources
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn stopwords_mut(&mut self) -> &mut StopwordSet {
        &mut self.stopwords
    }

    /// Fetch posts (the authenticated user's unless `screen_name` is given).
    pub async fn get_posts(
        &mut self,
        screen_name: Option<&str>,
        max_posts: usize,
        overwrite: bool,
    ) -> Result<Vec<String>> {
        self.sources
            .fetch_posts(&self.client, screen_name, max_posts, overwrite)
            .await
    }

    /// Fetch direct messages the authenticated user sent.
    pub async fn get_messages(
        &mut self,
        max_messages: usize,
        overwrite: bool,
    ) -> Result<Vec<String>> {
        self.sources
            .fetch_messages(&self.client, max_messages, overwrite)
            .await
    }

    /// The selected texts joined and normalized into one line.
    pub fn cleaned_text(&self, source: TextSource) -> String {
        normalize(&join_texts(&self.sources.texts(source)))
    }

    /// Score the selected texts and pick `max_words` of them per `order`.
    ///
    /// The table is rebuilt on every call.
    pub fn count_words(
        &self,
        source: TextSource,
        max_words: usize,
        order: SelectionOrder,
    ) -> WordCounts {
        let all = score(&self.cleaned_text(source), &self.stopwords);
        let selected = select_top(&all, max_words, order);
        info!(
            source = %source,
            distinct = all.len(),
            selected = selected.len(),
            "Counted words"
        );
        WordCounts { all, selected }
    }

    /// Render the selected texts to `path`, optionally opening the result.
    ///
    /// Empty collections fail with `Render` instead of producing a blank image.
    pub fn generate_word_cloud<R: Renderer + ?Sized>(
        &self,
        renderer: &R,
        source: TextSource,
        spec: &WordCloudSpec,
        path: &Path,
        show: bool,
    ) -> Result<()> {
        let text = self.cleaned_text(source);
        renderer.render_text(&text, &self.stopwords, spec, path)?;
        if show {
            show_image(path);
        }
        Ok(())
    }
}
