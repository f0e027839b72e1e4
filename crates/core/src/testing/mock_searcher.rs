//! Mock product searcher for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::searcher::{ProductSearcher, SearchError, SearchRequest, SearchResponse};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The request that was sent.
    pub request: SearchRequest,
}

/// A handler that produces a response dynamically based on the request.
type QueryHandler =
    Box<dyn Fn(&SearchRequest) -> Result<SearchResponse, SearchError> + Send + Sync>;

/// Mock implementation of the ProductSearcher trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable response, or compute one per request
/// - Track requests for assertions
/// - Simulate failures and per-query delays
///
/// # Example
///
/// ```rust,ignore
/// use stylefinder_core::testing::{fixtures, MockProductSearcher};
///
/// let searcher = MockProductSearcher::new();
/// searcher.set_response(fixtures::response(
///     vec![fixtures::in_stock_product("p1", "Floral Dress", 59.0)],
///     vec![],
/// )).await;
///
/// let response = searcher.search(&SearchRequest::new("floral dress", 5)).await?;
/// assert_eq!(response.recommended_in_stock_products.len(), 1);
/// assert_eq!(searcher.search_count().await, 1);
/// ```
pub struct MockProductSearcher {
    /// Response returned when no handler is set.
    response: Arc<RwLock<SearchResponse>>,
    /// Recorded requests.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
    /// Delay applied to every search without a matching per-query delay.
    delay: Arc<RwLock<Option<Duration>>>,
    /// Per-query delays (query fragment -> delay), first match wins.
    query_delays: Arc<RwLock<Vec<(String, Duration)>>>,
    /// Dynamic response generation.
    query_handler: Arc<RwLock<Option<QueryHandler>>>,
    /// Result of `health()`.
    healthy: AtomicBool,
}

impl std::fmt::Debug for MockProductSearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProductSearcher")
            .field("response", &"<response>")
            .field("searches", &"<searches>")
            .field("next_error", &"<next_error>")
            .field("delay", &"<delay>")
            .field("query_delays", &"<query_delays>")
            .field("query_handler", &"<handler>")
            .field("healthy", &self.healthy.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockProductSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProductSearcher {
    /// Create a new mock searcher returning empty lists.
    pub fn new() -> Self {
        Self {
            response: Arc::new(RwLock::new(SearchResponse::default())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
            query_delays: Arc::new(RwLock::new(Vec::new())),
            query_handler: Arc::new(RwLock::new(None)),
            healthy: AtomicBool::new(true),
        }
    }

    /// Set the response returned by subsequent searches.
    pub async fn set_response(&self, response: SearchResponse) {
        *self.response.write().await = response;
    }

    /// Get recorded searches.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every search by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// Delay searches whose query contains `fragment`.
    pub async fn set_delay_for(&self, fragment: &str, delay: Duration) {
        self.query_delays
            .write()
            .await
            .push((fragment.to_string(), delay));
    }

    /// Set a handler that computes the result for each request.
    ///
    /// Takes precedence over `set_response`, but not over `set_next_error`.
    pub async fn set_query_handler<F>(&self, handler: F)
    where
        F: Fn(&SearchRequest) -> Result<SearchResponse, SearchError> + Send + Sync + 'static,
    {
        *self.query_handler.write().await = Some(Box::new(handler));
    }

    /// Set what `health()` reports.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    async fn delay_for(&self, query: &str) -> Option<Duration> {
        let per_query = self
            .query_delays
            .read()
            .await
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, delay)| *delay);

        match per_query {
            Some(delay) => Some(delay),
            None => *self.delay.read().await,
        }
    }
}

#[async_trait]
impl ProductSearcher for MockProductSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.searches.write().await.push(RecordedSearch {
            request: request.clone(),
        });

        if let Some(delay) = self.delay_for(&request.query).await {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(handler) = self.query_handler.read().await.as_ref() {
            return handler(request);
        }

        Ok(self.response.read().await.clone())
    }

    async fn health(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}
