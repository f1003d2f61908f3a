//! Shared fakes for unit tests: an in-memory store, a counting tailor, and a
//! local chat-completions server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tokio::sync::{Mutex, Notify, RwLock};

use crate::llm_client::LlmError;
use crate::state::AppState;
use crate::store::{StateStore, StoreError};
use crate::tailoring::service::ResumeTailor;
use crate::workspace::models::PersistedState;
use crate::workspace::transitions::Workspace;

pub const SEVEN_SECTION_REPLY: &str = "첨삭한 주요 수정사항 키워드:
- Rust
- Kafka

핵심역량:
- 백엔드 개발

직무경험:
에이크미 | 엔지니어 | 2020-2024
- 결제 시스템 구현

프로젝트 A:
- 정산 파이프라인

프로젝트 B:
- 배포 도구

프로젝트 C:
- 모니터링

그 외 관련 경력:
- 정보처리기사";

// ────────────────────────────────────────────────────────────────────────────
// State
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Option<PersistedState>>,
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<PersistedState, StoreError> {
        Ok(self.state.lock().await.clone().unwrap_or_default())
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        *self.state.lock().await = Some(state.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.state.lock().await = None;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

pub fn test_state<T: ResumeTailor + 'static>(tailor: Arc<T>) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState {
        workspace: Arc::new(RwLock::new(Workspace::default())),
        store: store.clone(),
        tailor,
    };
    (state, store)
}

// ────────────────────────────────────────────────────────────────────────────
// Tailor
// ────────────────────────────────────────────────────────────────────────────

/// Returns a canned reply (or API error) and counts how often it was asked.
/// A gated tailor holds its reply until the `Notify` fires.
pub struct FakeTailor {
    reply: Result<String, u16>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakeTailor {
    pub fn succeeding(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(reply: &str, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::succeeding(reply)
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResumeTailor for FakeTailor {
    async fn tailor(
        &self,
        _resume: &str,
        _job_description: &str,
        _api_key: &str,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(LlmError::Api {
                status: *status,
                message: "fake failure".to_string(),
            }),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Completion server
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A chat-completions endpoint on an ephemeral local port.
pub struct MockCompletionServer {
    url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockCompletionServer {
    pub async fn replying_with(content: &str) -> Self {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 34}
        });
        Self::responding_raw(200, &body.to_string()).await
    }

    pub async fn failing_with(status: u16, body: &str) -> Self {
        Self::responding_raw(status, body).await
    }

    pub async fn responding_raw(status: u16, body: &str) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.to_string(),
            captured: captured.clone(),
        };
        let app = Router::new()
            .route("/v1/chat/completions", post(handle_completion))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            url: format!("http://{addr}/v1/chat/completions"),
            captured,
        }
    }

    pub fn url(&self) -> String {
        self.url.clone()
    }

    pub async fn last_request(&self) -> Option<CapturedRequest> {
        self.captured.lock().await.last().cloned()
    }
}

async fn handle_completion(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body_json = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.captured.lock().await.push(CapturedRequest {
        authorization,
        body: body_json,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}
