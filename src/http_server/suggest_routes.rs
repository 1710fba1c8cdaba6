//! Suggestion HTTP Routes
//!
//! `POST /v1/api/suggest` with body `{"input": "<key>"}` answers with the
//! ranked suggestions for that key. Every request runs under the
//! configured timeout guard.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::guard::TimeoutGuard;
use crate::index::{Entry, IndexStore};
use crate::observability::{Event, Logger, MetricsRegistry};

use super::errors::{SuggestError, SuggestResult};

// ==================
// Shared State
// ==================

/// State shared by the suggestion and observability handlers
pub struct SuggestState {
    pub store: Arc<IndexStore>,
    pub guard: TimeoutGuard,
    pub metrics: Arc<MetricsRegistry>,
}

impl SuggestState {
    pub fn new(store: Arc<IndexStore>, metrics: Arc<MetricsRegistry>, timeout: Duration) -> Self {
        Self {
            store,
            guard: TimeoutGuard::new(timeout).with_metrics(Arc::clone(&metrics)),
            metrics,
        }
    }
}

// ==================
// Request/Response Types
// ==================

/// Suggestion request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestRequest {
    pub input: Option<String>,
}

impl SuggestRequest {
    /// Returns the lookup key, rejecting a missing or null `input`
    pub fn validate(self) -> SuggestResult<String> {
        self.input
            .ok_or_else(|| SuggestError::Validation("input is empty".to_string()))
    }
}

/// One ranked suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub position: usize,
}

/// Map ranked entries to suggestions, position = rank
pub fn to_suggestions(entries: &[Entry]) -> Vec<Suggestion> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| Suggestion {
            text: entry.name.clone(),
            position,
        })
        .collect()
}

/// Decode a request body, look the key up and encode the ranked list.
pub fn suggest(store: &IndexStore, body: &[u8]) -> SuggestResult<Vec<u8>> {
    let request: SuggestRequest = serde_json::from_slice(body)
        .map_err(|e| SuggestError::Validation(format!("invalid request body: {}", e)))?;
    let key = request.validate()?;

    let entries = store.lookup(&key);
    serde_json::to_vec(&to_suggestions(&entries)).map_err(|e| SuggestError::Encoding(e.to_string()))
}

// ==================
// Routes
// ==================

/// Create suggestion routes
pub fn suggest_routes(state: Arc<SuggestState>) -> Router {
    Router::new()
        .route(
            "/v1/api/suggest",
            post(suggest_handler).fallback(method_not_implemented),
        )
        .with_state(state)
}

async fn suggest_handler(State(state): State<Arc<SuggestState>>, body: Bytes) -> Response {
    let store = Arc::clone(&state.store);
    guarded_json(&state, async move { suggest(&store, &body) }).await
}

async fn method_not_implemented() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

/// Run `work` under the state's timeout guard and turn its outcome into a
/// JSON response.
///
/// `work` yields an already-encoded JSON body. Errors, including the
/// deadline passing, become `{"error": ...}` responses.
pub async fn guarded_json<F>(state: &SuggestState, work: F) -> Response
where
    F: Future<Output = SuggestResult<Vec<u8>>> + Send + 'static,
{
    let request_id = Uuid::new_v4().to_string();
    state.metrics.increment_requests_received();

    let outcome = state.guard.run(work).await.map_err(SuggestError::from).and_then(|r| r);

    match outcome {
        Ok(body) => {
            state.metrics.increment_requests_served();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }
        Err(err) => {
            report_failure(state, &request_id, &err);
            err.into_response()
        }
    }
}

fn report_failure(state: &SuggestState, request_id: &str, err: &SuggestError) {
    let message = err.to_string();
    let fields = failure_fields(err, &message, request_id);
    match err {
        SuggestError::Validation(_) => {
            state.metrics.increment_requests_rejected();
            Logger::info(Event::RequestRejected, &fields);
        }
        SuggestError::Timeout => {
            let timeout_ms = state.guard.timeout().as_millis().to_string();
            Logger::warn(
                Event::RequestTimeout,
                &[
                    ("kind", err.kind()),
                    ("request_id", request_id),
                    ("timeout_ms", &timeout_ms),
                ],
            );
        }
        SuggestError::Encoding(_) => {
            state.metrics.increment_encoding_failures();
            Logger::error(Event::RequestEncodingFailed, &fields);
        }
        // The guard already logged the panic.
        SuggestError::Internal(_) => {}
    }
}

fn failure_fields<'a>(
    err: &SuggestError,
    message: &'a str,
    request_id: &'a str,
) -> [(&'static str, &'a str); 3] {
    [
        ("error", message),
        ("kind", err.kind()),
        ("request_id", request_id),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{DatasetRecord, RankedIndex};

    fn store_with(records: &[(&str, i64, &str)]) -> IndexStore {
        let store = IndexStore::new();
        store.replace(RankedIndex::build(records.iter().map(|(id, cost, name)| {
            DatasetRecord {
                id: id.to_string(),
                cost: *cost,
                name: name.to_string(),
            }
        })));
        store
    }

    #[test]
    fn test_suggest_ranks_by_cost() {
        let store = store_with(&[("a", 5, "apple"), ("a", 2, "avocado")]);

        let body = suggest(&store, br#"{"input":"a"}"#).unwrap();
        let parsed: Vec<Suggestion> = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            parsed,
            vec![
                Suggestion { text: "avocado".to_string(), position: 0 },
                Suggestion { text: "apple".to_string(), position: 1 },
            ]
        );
    }

    #[test]
    fn test_unknown_key_is_empty_list() {
        let store = store_with(&[("a", 1, "apple")]);
        assert_eq!(suggest(&store, br#"{"input":"missing"}"#).unwrap(), b"[]".to_vec());
    }

    #[test]
    fn test_missing_or_null_input_rejected() {
        let store = IndexStore::new();
        for body in [&br#"{}"#[..], br#"{"input":null}"#] {
            let err = suggest(&store, body).unwrap_err();
            assert_eq!(err, SuggestError::Validation("input is empty".to_string()));
        }
    }

    #[test]
    fn test_malformed_body_rejected() {
        let store = IndexStore::new();
        for body in [&b"not json"[..], b"", br#"{"input":7}"#] {
            let err = suggest(&store, body).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_failure_fields_carry_kind() {
        let err = SuggestError::Encoding("bad float".to_string());
        let message = err.to_string();
        let fields = failure_fields(&err, &message, "req-1");

        assert_eq!(
            fields,
            [("error", "bad float"), ("kind", "encoding"), ("request_id", "req-1")]
        );
    }

    #[tokio::test]
    async fn test_failures_counted_by_kind() {
        let metrics = Arc::new(MetricsRegistry::new());
        let state = SuggestState::new(
            Arc::new(IndexStore::new()),
            Arc::clone(&metrics),
            Duration::from_secs(2),
        );

        let rejected = guarded_json(&state, async {
            Err::<Vec<u8>, _>(SuggestError::Validation("input is empty".to_string()))
        })
        .await;
        let failed = guarded_json(&state, async {
            Err::<Vec<u8>, _>(SuggestError::Encoding("bad float".to_string()))
        })
        .await;

        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.requests_received, 2);
        assert_eq!(snapshot.requests_rejected, 1);
        assert_eq!(snapshot.encoding_failures, 1);
        assert_eq!(snapshot.requests_served, 0);
    }

    #[test]
    fn test_empty_string_is_a_valid_key() {
        let store = store_with(&[("", 1, "blank")]);
        let body = suggest(&store, br#"{"input":""}"#).unwrap();
        assert_eq!(body, br#"[{"text":"blank","position":0}]"#.to_vec());
    }
}
