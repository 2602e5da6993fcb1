//! Request coordination with a per-kind staleness guard
//!
//! Every dispatch gets the next session-wide sequence number, which becomes
//! the outstanding sequence for its kind. Transport tasks post their outcome
//! back as a [`Completion`]; only a completion whose sequence still matches
//! the outstanding one for its kind may change session state. Superseded
//! requests are never aborted, their answers are simply ignored.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use shared::{QueryKind, ServiceResponse, SessionId};
use shared::{session_debug, session_warn};
use crate::config::ExplorerConfig;
use crate::core::normalizer::Normalizer;
use crate::error::{ExplorerError, ExplorerResult};
use crate::state::{SessionSnapshot, SessionState};
use crate::traits::{ScoringService, call_service};
use crate::types::{HistoryEntry, Query};

/// Outcome of one transport task, tagged with the query that produced it
#[derive(Debug)]
pub struct Completion {
    pub query: Query,
    pub outcome: ExplorerResult<ServiceResponse>,
}

/// What applying a completion did to session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Result replaced and history recorded
    Accepted { result_summary: usize },
    /// Error set; previous result kept
    Failed { message: String },
    /// Superseded or cleared; state untouched
    Stale,
}

/// Single point of contact with the scoring service and sole writer of session state
pub struct RequestCoordinator<S>
where
    S: ScoringService + 'static,
{
    service: Arc<S>,
    state: SessionState,
    normalizer: Normalizer,
    request_timeout: Duration,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S> RequestCoordinator<S>
where
    S: ScoringService + 'static,
{
    pub fn new(service: S, config: &ExplorerConfig) -> Self {
        Self::with_shared_service(Arc::new(service), config)
    }

    pub fn with_shared_service(service: Arc<S>, config: &ExplorerConfig) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            service,
            state: SessionState::new(config.history_capacity),
            normalizer: Normalizer::with_top_k(config.top_k),
            request_timeout: config.request_timeout,
            completion_tx,
            completion_rx,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.state.session_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Issue a request for `input`, superseding any in flight for `kind`.
    ///
    /// Blank input never reaches the service: the slot is cleared and `None`
    /// returned.
    pub fn dispatch(&mut self, kind: QueryKind, input: impl Into<String>) -> Option<Query> {
        let input = input.into();
        if input.trim().is_empty() {
            self.clear(kind);
            return None;
        }

        let sequence = self.state.next_sequence();
        let query = Query::new(kind, input, sequence);
        if let Some(previous) = self.state.slot(kind).outstanding {
            session_debug!(self.state.session_id, "{} #{} supersedes #{}", kind, sequence, previous);
        }

        let slot = self.state.slot_mut(kind);
        slot.outstanding = Some(sequence);
        slot.current_query = Some(query.clone());

        session_debug!(self.state.session_id, "Dispatching {} #{}: {:?}", kind, sequence, query.raw_input());
        self.spawn_request(query.clone());
        Some(query)
    }

    fn spawn_request(&self, query: Query) {
        let service = Arc::clone(&self.service);
        let completion_tx = self.completion_tx.clone();
        let timeout = self.request_timeout;

        tokio::spawn(async move {
            let call = call_service(service.as_ref(), query.kind(), query.raw_input());
            let outcome = match tokio::time::timeout(timeout, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ExplorerError::Timeout {
                    after_ms: timeout.as_millis() as u64,
                }),
            };

            // The coordinator may already be gone; nothing left to update then
            let _ = completion_tx.send(Completion { query, outcome });
        });
    }

    /// Wait for the next transport task to finish
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completion_rx.recv().await
    }

    /// Completion handler: the only place session state changes after a reply
    pub fn apply(&mut self, completion: Completion) -> ApplyOutcome {
        let Completion { query, outcome } = completion;
        let kind = query.kind();
        let session_id = self.state.session_id.clone();

        if self.state.slot(kind).outstanding != Some(query.sequence()) {
            session_debug!(session_id, "Discarding stale {} #{}", kind, query.sequence());
            return ApplyOutcome::Stale;
        }

        let outcome = outcome.and_then(|response| {
            if response.kind() != kind {
                return Err(ExplorerError::malformed(format!("{} answered a {} query", response.kind(), kind)));
            }
            response.validate().map_err(|e| ExplorerError::malformed(e.to_string()))?;
            Ok(response)
        });

        match outcome {
            Ok(response) => {
                let result = self.normalizer.normalize(&response);
                let result_summary = result.result_summary();

                let slot = self.state.slot_mut(kind);
                slot.outstanding = None;
                slot.result = Some(result);
                slot.error = None;

                self.state
                    .history_mut(kind)
                    .record(HistoryEntry::new(query.clone(), result_summary));

                session_debug!(session_id, "Accepted {} #{} ({} items)", kind, query.sequence(), result_summary);
                ApplyOutcome::Accepted { result_summary }
            }
            Err(error) => {
                let message = error.user_message();
                session_warn!(session_id, "{} #{} failed: {}", kind, query.sequence(), error);

                let slot = self.state.slot_mut(kind);
                slot.outstanding = None;
                slot.error = Some(message.clone());

                ApplyOutcome::Failed { message }
            }
        }
    }

    /// Forget the result and error for `kind` and orphan anything in flight
    pub fn clear(&mut self, kind: QueryKind) {
        let slot = self.state.slot_mut(kind);
        slot.outstanding = None;
        slot.current_query = None;
        slot.result = None;
        slot.error = None;
        session_debug!(self.state.session_id, "Cleared {}", kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared::{AutocompleteResponse, AutocorrectResponse, CorpusStats, RawCorrection};
    use crate::traits::MockScoringService;

    fn definitely_response() -> AutocorrectResponse {
        AutocorrectResponse {
            original: "definately".to_string(),
            stats: CorpusStats { vocab_size: 49815, total_words: 981716 },
            corrections: vec![RawCorrection {
                word: "definitely".to_string(),
                frequency: 120,
                unsmoothed_prob: Some(0.0002),
                smoothed_prob: Some(0.00019),
            }],
        }
    }

    fn coordinator(mock: MockScoringService) -> RequestCoordinator<MockScoringService> {
        RequestCoordinator::new(mock, &ExplorerConfig::default().with_history_capacity(3))
    }

    #[tokio::test]
    async fn test_dispatch_and_accept() {
        let mut mock = MockScoringService::new();
        mock.expect_autocorrect()
            .withf(|word| word == "definately")
            .times(1)
            .returning(|_| Ok(definitely_response()));

        let mut coordinator = coordinator(mock);
        let query = coordinator.dispatch(QueryKind::Autocorrect, "definately").unwrap();
        assert!(coordinator.state().slot(QueryKind::Autocorrect).is_loading());

        let completion = coordinator.next_completion().await.unwrap();
        assert_eq!(completion.query, query);

        let outcome = coordinator.apply(completion);
        assert_eq!(outcome, ApplyOutcome::Accepted { result_summary: 1 });

        let corrections = coordinator.state().result(QueryKind::Autocorrect).unwrap().as_corrections().unwrap();
        assert_eq!(corrections.candidates[0].word, "definitely");
        assert!(!coordinator.state().slot(QueryKind::Autocorrect).is_loading());
        assert_eq!(coordinator.state().history(QueryKind::Autocorrect).len(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let mut mock = MockScoringService::new();
        mock.expect_autocorrect()
            .withf(|word| word == "definately")
            .returning(|_| Ok(definitely_response()));
        mock.expect_autocorrect()
            .withf(|word| word == "recieve")
            .returning(|_| Err(ExplorerError::ServiceStatus { status: 500, message: Some("model offline".to_string()) }));

        let mut coordinator = coordinator(mock);
        coordinator.dispatch(QueryKind::Autocorrect, "definately");
        let completion = coordinator.next_completion().await.unwrap();
        coordinator.apply(completion);

        coordinator.dispatch(QueryKind::Autocorrect, "recieve");
        let completion = coordinator.next_completion().await.unwrap();
        let outcome = coordinator.apply(completion);

        assert_matches!(outcome, ApplyOutcome::Failed { ref message } if message == "model offline");
        assert_eq!(coordinator.state().error(QueryKind::Autocorrect), Some("model offline"));
        assert!(coordinator.state().result(QueryKind::Autocorrect).is_some());
        // Failed queries never reach history
        assert_eq!(coordinator.state().history(QueryKind::Autocorrect).len(), 1);
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let mut mock = MockScoringService::new();
        mock.expect_autocorrect()
            .withf(|word| word == "x")
            .returning(|_| Err(ExplorerError::transport("connection refused")));
        mock.expect_autocorrect()
            .withf(|word| word == "definately")
            .returning(|_| Ok(definitely_response()));

        let mut coordinator = coordinator(mock);
        coordinator.dispatch(QueryKind::Autocorrect, "x");
        let completion = coordinator.next_completion().await.unwrap();
        coordinator.apply(completion);
        assert_eq!(coordinator.state().error(QueryKind::Autocorrect), Some("Server error"));

        coordinator.dispatch(QueryKind::Autocorrect, "definately");
        let completion = coordinator.next_completion().await.unwrap();
        coordinator.apply(completion);
        assert!(coordinator.state().error(QueryKind::Autocorrect).is_none());
    }

    #[tokio::test]
    async fn test_superseded_completion_is_stale() {
        let mut coordinator = coordinator(MockScoringService::new());

        // Completions are fed by hand, so no transport task is involved
        let old = Query::new(QueryKind::Autocorrect, "teh", 1);
        coordinator.state.slot_mut(QueryKind::Autocorrect).outstanding = Some(2);

        let outcome = coordinator.apply(Completion {
            query: old,
            outcome: Ok(ServiceResponse::Autocorrect(definitely_response())),
        });

        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(coordinator.state().result(QueryKind::Autocorrect).is_none());
        assert!(coordinator.state().history(QueryKind::Autocorrect).is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_never_dispatches() {
        // No expectations: any call would panic the transport task
        let mut coordinator = coordinator(MockScoringService::new());

        assert!(coordinator.dispatch(QueryKind::Autocomplete, "   ").is_none());
        assert_eq!(coordinator.state().last_sequence(), 0);
    }

    #[tokio::test]
    async fn test_clear_orphans_in_flight_request() {
        let mut mock = MockScoringService::new();
        mock.expect_autocorrect().returning(|_| Ok(definitely_response()));

        let mut coordinator = coordinator(mock);
        coordinator.dispatch(QueryKind::Autocorrect, "definately");
        coordinator.clear(QueryKind::Autocorrect);

        let completion = coordinator.next_completion().await.unwrap();
        assert_eq!(coordinator.apply(completion), ApplyOutcome::Stale);
        assert!(coordinator.state().result(QueryKind::Autocorrect).is_none());
        assert!(coordinator.state().error(QueryKind::Autocorrect).is_none());
    }

    #[tokio::test]
    async fn test_mismatched_response_kind_is_failure() {
        let mut coordinator = coordinator(MockScoringService::new());
        let query = Query::new(QueryKind::Autocomplete, "the cat", 1);
        coordinator.state.slot_mut(QueryKind::Autocomplete).outstanding = Some(1);

        let outcome = coordinator.apply(Completion {
            query,
            outcome: Ok(ServiceResponse::Autocorrect(definitely_response())),
        });

        assert_matches!(outcome, ApplyOutcome::Failed { .. });
        assert!(coordinator.state().result(QueryKind::Autocomplete).is_none());
    }

    #[tokio::test]
    async fn test_autocomplete_body_without_variants_is_failure() {
        let mut coordinator = coordinator(MockScoringService::new());
        coordinator.state.slot_mut(QueryKind::Autocomplete).outstanding = Some(1);

        let outcome = coordinator.apply(Completion {
            query: Query::new(QueryKind::Autocomplete, "the", 1),
            outcome: Ok(ServiceResponse::Autocomplete(AutocompleteResponse::default())),
        });

        assert_matches!(outcome, ApplyOutcome::Failed { ref message } if message == "Server error: unexpected response");
        assert!(coordinator.state().result(QueryKind::Autocomplete).is_none());
        assert!(coordinator.state().history(QueryKind::Autocomplete).is_empty());
    }

    #[tokio::test]
    async fn test_kinds_do_not_share_staleness() {
        let mut coordinator = coordinator(MockScoringService::new());
        coordinator.state.slot_mut(QueryKind::Autocorrect).outstanding = Some(1);
        coordinator.state.slot_mut(QueryKind::SentenceProbability).outstanding = Some(2);

        let outcome = coordinator.apply(Completion {
            query: Query::new(QueryKind::Autocorrect, "definately", 1),
            outcome: Ok(ServiceResponse::Autocorrect(definitely_response())),
        });

        assert_matches!(outcome, ApplyOutcome::Accepted { .. });
        assert!(coordinator.state().slot(QueryKind::SentenceProbability).is_loading());
    }
}
