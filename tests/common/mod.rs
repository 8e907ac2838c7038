#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use vanigar_portal::routes::create_router;
use vanigar_portal::services::answer::{
    AnswerService, GenerationError, GenerationRequest, TextGenerator,
};
use vanigar_portal::services::session_store::{MemoryStorage, SessionStore};
use vanigar_portal::state::{AppState, SharedState};

pub enum Canned {
    Text(&'static str),
    Empty,
    Fail,
}

/// Stand-in generator that counts calls and returns a fixed outcome.
pub struct StubGenerator {
    pub canned: Canned,
    pub calls: AtomicUsize,
    pub delay: Option<Duration>,
}

impl StubGenerator {
    pub fn new(canned: Canned) -> Arc<Self> {
        Arc::new(Self { canned, calls: AtomicUsize::new(0), delay: None })
    }

    pub fn with_delay(canned: Canned, delay: Duration) -> Arc<Self> {
        Arc::new(Self { canned, calls: AtomicUsize::new(0), delay: Some(delay) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.canned {
            Canned::Text(t) => Ok(Some(t.to_string())),
            Canned::Empty => Ok(None),
            Canned::Fail => Err(GenerationError::Decode(format!(
                "stub failure for {:?}",
                request.prompt
            ))),
        }
    }
}

pub fn state_with(backend: Arc<StubGenerator>, api_key: Option<&str>) -> SharedState {
    state_with_ttl(backend, api_key, Duration::from_secs(60))
}

pub fn state_with_ttl(
    backend: Arc<StubGenerator>,
    api_key: Option<&str>,
    chat_ttl: Duration,
) -> SharedState {
    let session = SessionStore::open(Arc::new(MemoryStorage::new()));
    let answers = AnswerService::new(api_key.map(str::to_string), "gemini-2.5-flash", backend);
    Arc::new(AppState::new(session, answers, chat_ttl))
}

pub fn app_with(backend: Arc<StubGenerator>) -> (Router, SharedState) {
    let state = state_with(backend, Some("test-key"));
    (create_router(state.clone()), state)
}
