//! Recipe API client trait and implementations.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (compatible; Skillet/1.0)";

/// Trait for upstream recipe API access, enabling mockability in tests.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Lightweight existence probe. Any failure maps to `false`.
    async fn check_reachable(&self) -> bool;

    /// Full GET of the recipe document at the configured URL.
    async fn fetch_document(&self) -> Result<Value, ApiError>;
}

/// Production client backed by reqwest.
pub struct HttpRecipeApi {
    inner: reqwest::Client,
    url: String,
}

impl HttpRecipeApi {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn check_reachable(&self) -> bool {
        match self.inner.head(&self.url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "recipe API probe failed");
                false
            }
        }
    }

    async fn fetch_document(&self) -> Result<Value, ApiError> {
        tracing::info!(url = %self.url, "fetching recipe document");

        let response = self.inner.get(&self.url).send().await?;
        let status = response.status();

        if status.as_u16() >= 400 {
            tracing::warn!(url = %self.url, status = %status, "recipe API request failed");
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(ApiError::MalformedResponse(
                "empty response body".to_string(),
            ));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }
}

/// Scripted client for tests. Documents and errors are returned in the order
/// they were queued; fetches are counted so tests can assert the client was
/// (or was not) invoked.
pub struct MockRecipeApi {
    reachable: bool,
    responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    fetches: AtomicUsize,
}

impl MockRecipeApi {
    pub fn new() -> Self {
        Self {
            reachable: true,
            responses: Mutex::new(VecDeque::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A client whose reachability probe always fails.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// Queue a successful document response.
    pub fn with_document(self, document: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(document));
        self
    }

    /// Queue an error response.
    pub fn with_error(self, error: ApiError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Number of `fetch_document` calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MockRecipeApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeApi for MockRecipeApi {
    async fn check_reachable(&self) -> bool {
        self.reachable
    }

    async fn fetch_document(&self) -> Result<Value, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::MalformedResponse(
                    "no scripted response left".to_string(),
                ))
            })
    }
}
