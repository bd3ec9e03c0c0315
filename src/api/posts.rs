//! Post query capability and its HTTP implementation.
//!
//! The server exposes `posts.getAll` as a tRPC query. Responses come wrapped
//! in the tRPC envelope, with or without the superjson `json` layer:
//!
//! ```text
//! {"result":{"data":{"json":[{ "post": {...}, "author": {...} }]}}}
//! {"result":{"data":[{ "post": {...}, "author": {...} }]}}
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::sync::watch;

use crate::api::query::{QueryCache, QueryKey, QueryStatus};
use crate::core::model::PostWithAuthor;

/// Errors from the post query layer.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-success status.
    Api { status: u16, message: String },
    /// Body did not match the expected shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Every post with its author, in server order.
    async fn all_posts(&self) -> Result<Vec<PostWithAuthor>, ApiError>;
}

// ============================================================================
// tRPC envelope
// ============================================================================

#[derive(Deserialize, Debug)]
struct TrpcResponse {
    result: TrpcResult,
}

#[derive(Deserialize, Debug)]
struct TrpcResult {
    data: TrpcData,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum TrpcData {
    Superjson { json: Vec<PostWithAuthor> },
    Plain(Vec<PostWithAuthor>),
}

impl TrpcData {
    fn into_posts(self) -> Vec<PostWithAuthor> {
        match self {
            TrpcData::Superjson { json } => json,
            TrpcData::Plain(posts) => posts,
        }
    }
}

/// Parses a `posts.getAll` response body.
pub fn parse_all_posts(body: &str) -> Result<Vec<PostWithAuthor>, ApiError> {
    let response: TrpcResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(response.result.data.into_posts())
}

// ============================================================================
// HTTP implementation
// ============================================================================

pub struct HttpPostSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPostSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/trpc/{}", self.base_url, QueryKey::AllPosts.name())
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn all_posts(&self) -> Result<Vec<PostWithAuthor>, ApiError> {
        let url = self.endpoint();
        info!("Fetching posts from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("Posts response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Posts API error: {} - {}", status, message);
            return Err(ApiError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let posts = parse_all_posts(&body)?;
        info!("Fetched {} posts", posts.len());
        Ok(posts)
    }
}

/// Subscribe to the shared `posts.getAll` query.
///
/// Both the page-level prefetch and the feed list go through here, so only
/// the first call reaches `source`.
pub fn use_all_posts(
    cache: &QueryCache<Vec<PostWithAuthor>>,
    source: &Arc<dyn PostSource>,
) -> watch::Receiver<QueryStatus<Vec<PostWithAuthor>>> {
    let source = Arc::clone(source);
    cache.use_query(QueryKey::AllPosts, move || async move {
        source.all_posts().await
    })
}
