// Retrieval seam: everything the text pipeline needs from a social platform.
//
// The real implementation is TwitterClient; tests plug in an in-memory fake.

use async_trait::async_trait;

use super::client::TwitterClient;
use super::{messages, posts};
use crate::error::Result;

#[async_trait]
pub trait SocialClient: Send + Sync {
    /// Screen name of the authenticated user.
    fn screen_name(&self) -> &str;

    /// Raw post texts, newest first, excluding reposts. Defaults to the
    /// authenticated user's own posts when `screen_name` is `None`.
    async fn fetch_user_posts(
        &self,
        screen_name: Option<&str>,
        max_count: usize,
    ) -> Result<Vec<String>>;

    /// Raw texts of direct messages the authenticated user sent.
    async fn fetch_sent_messages(&self, max_count: usize) -> Result<Vec<String>>;
}

#[async_trait]
impl SocialClient for TwitterClient {
    fn screen_name(&self) -> &str {
        &self.user().screen_name
    }

    async fn fetch_user_posts(
        &self,
        screen_name: Option<&str>,
        max_count: usize,
    ) -> Result<Vec<String>> {
        let screen_name = screen_name.unwrap_or(&self.user().screen_name);
        posts::fetch_user_posts(self, screen_name, max_count).await
    }

    async fn fetch_sent_messages(&self, max_count: usize) -> Result<Vec<String>> {
        messages::fetch_sent_messages(self, max_count).await
    }
}
