//! Fetching stories from the Hacker News search API.
//!
//! The reducer never fetches; the gateway is the seam where the network
//! lives. [`StoriesLoader`](crate::loader::StoriesLoader) drives any
//! [`StoryGateway`] implementation, so tests substitute a canned gateway
//! and production uses [`HackerNewsGateway`].

use crate::types::{Story, StoryId};
use serde::Deserialize;

/// Default search endpoint (Algolia's Hacker News index)
pub const API_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?query=";

/// Errors from a story gateway
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request failed in transit or the body did not decode
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected status {0}")]
    Status(u16),
}

/// A source of stories for a search query
///
/// Implementations perform the actual retrieval; the loader owns retries,
/// staleness guarding, and action dispatch.
pub trait StoryGateway: Send + Sync {
    /// Search for stories matching `query`
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Story>, GatewayError>> + Send;
}

/// One hit of the Algolia search response
///
/// The index mixes stories with comments and occasionally returns hits with
/// null titles or urls; decoding is tolerant and conversion filters those
/// out.
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "objectID")]
    object_id: String,
    title: Option<String>,
    url: Option<String>,
    author: Option<String>,
    num_comments: Option<u64>,
    points: Option<u64>,
}

impl SearchHit {
    fn into_story(self) -> Option<Story> {
        let title = self.title?;
        Some(Story {
            id: StoryId::new(self.object_id),
            title,
            url: self.url.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            num_comments: self.num_comments.unwrap_or_default(),
            points: self.points.unwrap_or_default(),
        })
    }
}

/// The Algolia search response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

/// Gateway backed by the Hacker News search API
#[derive(Debug, Clone)]
pub struct HackerNewsGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HackerNewsGateway {
    /// Creates a gateway against the public API
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(API_ENDPOINT)
    }

    /// Creates a gateway against a custom endpoint (local stubs, proxies)
    ///
    /// The query is appended verbatim, so the endpoint should end with its
    /// query parameter, e.g. `http://localhost:8080/search?query=`.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HackerNewsGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryGateway for HackerNewsGateway {
    async fn search(&self, query: &str) -> Result<Vec<Story>, GatewayError> {
        let url = format!("{}{query}", self.endpoint);
        tracing::debug!(%url, "Fetching stories");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Search request rejected");
            return Err(GatewayError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        let stories: Vec<Story> = body
            .hits
            .into_iter()
            .filter_map(SearchHit::into_story)
            .collect();

        tracing::debug!(count = stories.len(), "Fetched stories");
        Ok(stories)
    }
}
