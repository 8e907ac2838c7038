// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::answer::AnswerService;
use crate::services::chat_log::ChatLogManager;
use crate::services::session_store::SessionStore;

pub type SharedState = Arc<AppState>;

/// Everything the routes share. Built once in `main` (or a test) and
/// passed down explicitly.
pub struct AppState {
    pub session: SessionStore,
    pub chats: ChatLogManager,
    pub answers: AnswerService,
}

impl AppState {
    pub fn new(session: SessionStore, answers: AnswerService, chat_ttl: Duration) -> Self {
        Self {
            session,
            chats: ChatLogManager::new(chat_ttl),
            answers,
        }
    }
}
