//! Content service client.

use tracing::instrument;

use ingeniia_core::content::{CodeSnippetData, VideoData};
use ingeniia_core::{BaseUrl, Result, Topic};

use crate::client::ApiClient;
use crate::endpoints::{SNIPPETS_BY_TOPIC, VIDEOS_BY_TOPIC};

/// Read-only access to lesson videos and code snippets.
#[derive(Debug, Clone)]
pub struct ContentService {
    client: ApiClient,
    base: BaseUrl,
}

impl ContentService {
    pub fn new(client: ApiClient, base: BaseUrl) -> Self {
        Self { client, base }
    }

    /// List the videos of a topic.
    #[instrument(skip(self), fields(content = %self.base))]
    pub async fn videos_by_topic(&self, topic: Topic) -> Result<Vec<VideoData>> {
        let endpoint = self.base.endpoint(&format!("{}/{}", VIDEOS_BY_TOPIC, topic));
        self.client.get(&endpoint).await
    }

    /// List the code snippets of a topic.
    #[instrument(skip(self), fields(content = %self.base))]
    pub async fn snippets_by_topic(&self, topic: Topic) -> Result<Vec<CodeSnippetData>> {
        let endpoint = self.base.endpoint(&format!("{}/{}", SNIPPETS_BY_TOPIC, topic));
        self.client.get(&endpoint).await
    }
}
