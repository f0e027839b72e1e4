//! Search orchestrator implementation.
//!
//! Drives one search slot through its states:
//! - Idle: nothing submitted yet
//! - Loading: a validated query is in flight
//! - Success / Error: outcome of the most recently issued attempt
//!
//! Overlapping submits are allowed. Each is stamped with a sequence number
//! and only the most recently issued one may publish its result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::metrics;
use crate::query::{build_query, AgeRange, ColorStyle, Gender, SearchFilters};
use crate::searcher::{ProductSearcher, SearchError, SearchRequest};
use crate::validation::{QueryValidator, RejectReason, ValidationOutcome};

use super::config::OrchestratorConfig;
use super::types::{SearchState, SubmitOutcome};

/// The search orchestrator - validates, augments, dispatches and publishes.
pub struct SearchOrchestrator {
    config: OrchestratorConfig,
    validator: QueryValidator,
    searcher: Arc<dyn ProductSearcher>,
    filters: RwLock<SearchFilters>,

    // Published state
    state_tx: watch::Sender<SearchState>,
    form_error_tx: watch::Sender<Option<RejectReason>>,
    // Only bumped inside a `state_tx` modify closure.
    latest_sequence: AtomicU64,
}

impl SearchOrchestrator {
    /// Create an orchestrator with the built-in validation policy.
    pub fn new(config: OrchestratorConfig, searcher: Arc<dyn ProductSearcher>) -> Self {
        let (state_tx, _) = watch::channel(SearchState::Idle);
        let (form_error_tx, _) = watch::channel(None);

        Self {
            config,
            validator: QueryValidator::default(),
            searcher,
            filters: RwLock::new(SearchFilters::default()),
            state_tx,
            form_error_tx,
            latest_sequence: AtomicU64::new(0),
        }
    }

    /// Create an orchestrator from the full application config.
    pub fn from_config(
        config: &Config,
        searcher: Arc<dyn ProductSearcher>,
    ) -> Result<Self, ConfigError> {
        let validator = QueryValidator::from_config(&config.policy)?;
        Ok(Self::new(config.orchestrator.clone(), searcher).with_validator(validator))
    }

    /// Replace the query validator.
    pub fn with_validator(mut self, validator: QueryValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Current search state.
    pub fn state(&self) -> SearchState {
        self.state_tx.borrow().clone()
    }

    /// Watch search state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state_tx.subscribe()
    }

    /// The validation message currently shown next to the input, if any.
    pub fn form_error(&self) -> Option<RejectReason> {
        *self.form_error_tx.borrow()
    }

    /// Watch the inline validation message.
    pub fn subscribe_form_errors(&self) -> watch::Receiver<Option<RejectReason>> {
        self.form_error_tx.subscribe()
    }

    pub async fn filters(&self) -> SearchFilters {
        *self.filters.read().await
    }

    pub async fn set_filters(&self, filters: SearchFilters) {
        *self.filters.write().await = filters;
    }

    pub async fn set_gender(&self, gender: Gender) {
        self.filters.write().await.gender = gender;
    }

    pub async fn set_age_range(&self, age_range: AgeRange) {
        self.filters.write().await.age_range = age_range;
    }

    pub async fn set_color_style(&self, color_style: ColorStyle) {
        self.filters.write().await.color_style = color_style;
    }

    /// Keystroke hook.
    ///
    /// Clears the inline validation message and returns advisory feedback
    /// for the new text. Never touches the search state.
    pub fn input_changed(&self, text: &str) -> ValidationOutcome {
        self.form_error_tx.send_if_modified(|error| error.take().is_some());
        self.validator.validate(text)
    }

    /// Validate, augment and run a search for `raw_query`.
    ///
    /// A rejected query leaves the search state as it was and raises the
    /// inline validation message instead.
    pub async fn submit(&self, raw_query: &str) -> SubmitOutcome {
        if let ValidationOutcome::Rejected(reason) = self.validator.validate(raw_query) {
            debug!(reason = reason.code(), "Search submit rejected");
            metrics::VALIDATION_REJECTIONS
                .with_label_values(&[reason.code()])
                .inc();
            self.form_error_tx.send_replace(Some(reason));
            return SubmitOutcome::Rejected(reason);
        }

        let filters = self.filters().await;
        let request = SearchRequest::new(build_query(raw_query, &filters), self.config.top_k);

        let mut sequence = 0;
        self.state_tx.send_modify(|state| {
            sequence = self.latest_sequence.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchState::Loading;
        });
        self.form_error_tx.send_if_modified(|error| error.take().is_some());

        info!(
            sequence,
            searcher = self.searcher.name(),
            query = %request.query,
            "Search started"
        );

        let result = match tokio::time::timeout(
            self.config.request_timeout(),
            self.searcher.search(&request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SearchError::Transport(format!(
                "no response within {} ms",
                self.config.request_timeout_ms
            ))),
        };

        let (next, counts) = match result {
            Ok(response) => {
                let counts = (
                    response.recommended_in_stock_products.len(),
                    response.recommended_out_of_stock_products.len(),
                );
                let state = SearchState::Success {
                    in_stock: response.recommended_in_stock_products,
                    out_of_stock: response.recommended_out_of_stock_products,
                };
                (state, Some(counts))
            }
            Err(e) => {
                warn!(sequence, error = %e, kind = e.kind().as_str(), "Search failed");
                (SearchState::failed(&e), None)
            }
        };

        // Sequence bumps happen under the same lock, so a newer submit
        // cannot slip in between this check and the write.
        let applied = self.state_tx.send_if_modified(|state| {
            if self.latest_sequence.load(Ordering::SeqCst) != sequence {
                return false;
            }
            *state = next;
            true
        });

        if !applied {
            metrics::STALE_RESPONSES.inc();
            debug!(
                sequence,
                latest = self.latest_sequence.load(Ordering::SeqCst),
                "Discarding superseded search result"
            );
            return SubmitOutcome::Superseded { sequence };
        }

        if let Some((in_stock, out_of_stock)) = counts {
            metrics::PRODUCTS_RETURNED
                .with_label_values(&["in_stock"])
                .observe(in_stock as f64);
            metrics::PRODUCTS_RETURNED
                .with_label_values(&["out_of_stock"])
                .observe(out_of_stock as f64);
            info!(sequence, in_stock, out_of_stock, "Search results applied");
        }

        SubmitOutcome::Applied { sequence }
    }

    /// Probe the backend's liveness endpoint.
    pub async fn health(&self) -> bool {
        self.searcher.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::searcher::{SearchErrorKind, SearchResponse};
    use crate::testing::{fixtures, MockProductSearcher};

    fn orchestrator(searcher: &Arc<MockProductSearcher>) -> SearchOrchestrator {
        SearchOrchestrator::new(OrchestratorConfig::default(), searcher.clone())
    }

    #[tokio::test]
    async fn test_submit_success_partitions_results() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher
            .set_response(fixtures::response(
                vec![
                    fixtures::in_stock_product("p1", "Floral Dress", 59.0),
                    fixtures::in_stock_product("p2", "Linen Dress", 45.0),
                ],
                vec![fixtures::out_of_stock_product("p3", "Silk Dress")],
            ))
            .await;
        let orch = orchestrator(&searcher);

        let outcome = orch.submit("summer dress").await;

        assert_eq!(outcome, SubmitOutcome::Applied { sequence: 1 });
        let state = orch.state();
        let ids: Vec<_> = state.in_stock().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert_eq!(state.out_of_stock().len(), 1);
        assert_eq!(state.out_of_stock()[0].id.as_str(), "p3");
    }

    #[tokio::test]
    async fn test_filters_fold_into_wire_query() {
        let searcher = Arc::new(MockProductSearcher::new());
        let orch = orchestrator(&searcher);
        orch.set_gender(Gender::Women).await;
        orch.set_color_style(ColorStyle::Warm).await;

        orch.submit("red shoes").await;

        let searches = searcher.recorded_searches().await;
        assert_eq!(searches.len(), 1);
        assert_eq!(
            searches[0].request.query,
            ", preference: gender:women, color:warm red shoes"
        );
        assert_eq!(searches[0].request.top_k, 5);
    }

    #[tokio::test]
    async fn test_rejected_submit_leaves_state_untouched() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher
            .set_response(fixtures::response(
                vec![fixtures::in_stock_product("p1", "Parka", 120.0)],
                vec![],
            ))
            .await;
        let orch = orchestrator(&searcher);

        // From Idle
        let outcome = orch.submit("123456").await;
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::NumericOnly));
        assert_eq!(orch.state(), SearchState::Idle);
        assert_eq!(orch.form_error(), Some(RejectReason::NumericOnly));

        // From Success
        orch.submit("winter parka").await;
        let before = orch.state();
        let outcome = orch.submit("gun shop").await;
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::HarmfulContent));
        assert_eq!(orch.state(), before);
        assert_eq!(searcher.search_count().await, 1);
    }

    #[tokio::test]
    async fn test_accepted_submit_clears_form_error() {
        let searcher = Arc::new(MockProductSearcher::new());
        let orch = orchestrator(&searcher);

        orch.submit("!!!").await;
        assert_eq!(orch.form_error(), Some(RejectReason::SymbolsOnly));

        orch.submit("denim jacket").await;
        assert_eq!(orch.form_error(), None);
    }

    #[tokio::test]
    async fn test_input_changed_clears_form_error_only() {
        let searcher = Arc::new(MockProductSearcher::new());
        let orch = orchestrator(&searcher);

        orch.submit("").await;
        assert_eq!(orch.form_error(), Some(RejectReason::Empty));

        let feedback = orch.input_changed("<b");
        assert_eq!(
            feedback,
            ValidationOutcome::Rejected(RejectReason::InvalidCharacters)
        );
        assert_eq!(orch.form_error(), None);
        assert_eq!(orch.state(), SearchState::Idle);
        assert_eq!(searcher.search_count().await, 0);
    }

    #[tokio::test]
    async fn test_error_clears_previous_results() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher
            .set_response(fixtures::response(
                vec![fixtures::in_stock_product("p1", "Scarf", 19.0)],
                vec![fixtures::out_of_stock_product("p2", "Beanie")],
            ))
            .await;
        let orch = orchestrator(&searcher);

        orch.submit("wool scarf").await;
        assert!(orch.state().has_results());

        searcher.set_next_error(SearchError::Http { status: 500 }).await;
        let outcome = orch.submit("wool scarf").await;

        assert!(outcome.is_applied());
        let state = orch.state();
        assert!(!state.has_results());
        assert!(state.error_message().is_some());
        assert!(matches!(
            state,
            SearchState::Error {
                kind: SearchErrorKind::Http,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_recovers_after_error() {
        let searcher = Arc::new(MockProductSearcher::new());
        let orch = orchestrator(&searcher);

        searcher
            .set_next_error(SearchError::Transport("connection refused".into()))
            .await;
        orch.submit("trench coat").await;
        assert!(orch.state().error_message().is_some());

        searcher
            .set_response(fixtures::response(
                vec![fixtures::in_stock_product("p9", "Trench Coat", 150.0)],
                vec![],
            ))
            .await;
        orch.submit("trench coat").await;
        assert_eq!(orch.state().in_stock().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher
            .set_query_handler(|request| {
                let id = if request.query.contains("summer") {
                    "slow"
                } else {
                    "fast"
                };
                Ok(fixtures::response(
                    vec![fixtures::in_stock_product(id, id, 10.0)],
                    vec![],
                ))
            })
            .await;
        searcher
            .set_delay_for("summer", Duration::from_millis(300))
            .await;
        searcher
            .set_delay_for("winter", Duration::from_millis(10))
            .await;
        let orch = orchestrator(&searcher);

        let (first, second) = tokio::join!(orch.submit("summer dress"), async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            orch.submit("winter coat").await
        });

        assert_eq!(first, SubmitOutcome::Superseded { sequence: 1 });
        assert_eq!(second, SubmitOutcome::Applied { sequence: 2 });
        let state = orch.state();
        assert_eq!(state.in_stock().len(), 1);
        assert_eq!(state.in_stock()[0].id.as_str(), "fast");
    }

    #[tokio::test]
    async fn test_stale_error_does_not_replace_newer_result() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher
            .set_query_handler(|request| {
                if request.query.contains("slow") {
                    Err(SearchError::Http { status: 503 })
                } else {
                    Ok(fixtures::response(
                        vec![fixtures::in_stock_product("ok", "Cardigan", 35.0)],
                        vec![],
                    ))
                }
            })
            .await;
        searcher.set_delay_for("slow", Duration::from_millis(200)).await;
        let orch = orchestrator(&searcher);

        let (first, second) = tokio::join!(orch.submit("slow cardigan"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            orch.submit("cardigan").await
        });

        assert!(matches!(first, SubmitOutcome::Superseded { .. }));
        assert!(second.is_applied());
        assert_eq!(orch.state().in_stock()[0].id.as_str(), "ok");
    }

    #[tokio::test]
    async fn test_timeout_maps_to_transport_error() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher.set_delay(Duration::from_millis(500)).await;
        let config = OrchestratorConfig {
            request_timeout_ms: 50,
            ..Default::default()
        };
        let orch = SearchOrchestrator::new(config, searcher.clone());

        let outcome = orch.submit("rain jacket").await;

        assert!(outcome.is_applied());
        assert!(matches!(
            orch.state(),
            SearchState::Error {
                kind: SearchErrorKind::Transport,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_subscribers_observe_loading_then_result() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher.set_delay(Duration::from_millis(100)).await;
        searcher
            .set_response(SearchResponse::new(
                vec![fixtures::in_stock_product("p1", "Loafers", 89.0)],
                vec![],
            ))
            .await;
        let orch = Arc::new(orchestrator(&searcher));
        let mut rx = orch.subscribe();

        let handle = tokio::spawn({
            let orch = Arc::clone(&orch);
            async move { orch.submit("leather loafers").await }
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().in_stock().len(), 1);

        assert!(handle.await.unwrap().is_applied());
    }

    #[tokio::test]
    async fn test_rejected_submit_while_loading_keeps_loading() {
        let searcher = Arc::new(MockProductSearcher::new());
        searcher.set_delay(Duration::from_millis(100)).await;
        let orch = Arc::new(orchestrator(&searcher));

        let handle = tokio::spawn({
            let orch = Arc::clone(&orch);
            async move { orch.submit("velvet blazer").await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(orch.state().is_loading());

        let outcome = orch.submit("{}").await;
        assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::SymbolsOnly));
        assert!(orch.state().is_loading());

        assert_eq!(handle.await.unwrap(), SubmitOutcome::Applied { sequence: 1 });
    }

    #[tokio::test]
    async fn test_from_config_applies_policy_and_top_k() {
        let config = crate::config::load_config_from_str(
            r#"
[orchestrator]
top_k = 3

[policy]
harmful_terms = ["sequins"]
"#,
        )
        .unwrap();
        let searcher = Arc::new(MockProductSearcher::new());
        let orch = SearchOrchestrator::from_config(&config, searcher.clone()).unwrap();

        assert_eq!(
            orch.submit("sequins top").await,
            SubmitOutcome::Rejected(RejectReason::HarmfulContent)
        );
        assert!(orch.submit("gun metal grey boots").await.is_applied());
        assert_eq!(searcher.recorded_searches().await[0].request.top_k, 3);
    }

    #[tokio::test]
    async fn test_health_delegates_to_searcher() {
        let searcher = Arc::new(MockProductSearcher::new());
        let orch = orchestrator(&searcher);
        assert!(orch.health().await);

        searcher.set_healthy(false);
        assert!(!orch.health().await);
    }
}
