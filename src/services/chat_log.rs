// src/services/chat_log.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const GREETING: &str = "வணக்கம்! நான் உங்கள் தொழில் வணிக உதவியாளர். வணிகம், ஜிஎஸ்டி (GST), ஏற்றுமதி அல்லது உரிமங்கள் பற்றிய கேள்விகளைக் கேளுங்கள்.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Clone, Debug)]
pub struct ChatLog {
    pub id: String,
    pub messages: Vec<ChatMessage>,
    pub last_active: Instant,
    // Questions still waiting on an answer. A chat with any is never purged.
    pending: usize,
}

impl ChatLog {
    /// A fresh log opens with the assistant greeting.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            messages: vec![ChatMessage::new(MessageRole::Assistant, GREETING)],
            last_active: Instant::now(),
            pending: 0,
        }
    }

    fn push(&mut self, role: MessageRole, text: String) -> usize {
        self.messages.push(ChatMessage::new(role, text));
        self.last_active = Instant::now();
        self.messages.len()
    }
}

#[derive(Clone)]
pub struct ChatLogManager {
    inner: Arc<RwLock<HashMap<String, ChatLog>>>,
    ttl: Duration,
}

impl Debug for ChatLogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatLogManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ChatLogManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a fresh chat and return its id.
    pub async fn create_chat(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), ChatLog::new(id.clone()));
        id
    }

    /// Ensure there's a chat with this id.
    pub async fn ensure_chat(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| ChatLog::new(id.to_string()));
        id.to_string()
    }

    /// Append the user's question and mark an answer as outstanding.
    /// Returns the new log length.
    pub async fn append_question(&self, chat_id: &str, text: impl Into<String>) -> usize {
        let mut guard = self.inner.write().await;
        let entry = guard
            .entry(chat_id.to_string())
            .or_insert_with(|| ChatLog::new(chat_id.to_string()));
        entry.pending += 1;
        entry.push(MessageRole::User, text.into())
    }

    /// Append the answer to an outstanding question. Returns `None` when
    /// the chat no longer exists; a purged chat is never recreated here.
    pub async fn append_answer(&self, chat_id: &str, text: impl Into<String>) -> Option<usize> {
        let mut guard = self.inner.write().await;
        let entry = guard.get_mut(chat_id)?;
        entry.pending = entry.pending.saturating_sub(1);
        Some(entry.push(MessageRole::Assistant, text.into()))
    }

    pub async fn history(&self, chat_id: &str) -> Option<Vec<ChatMessage>> {
        let guard = self.inner.read().await;
        guard.get(chat_id).map(|c| c.messages.clone())
    }

    /// Drop chats idle longer than ttl that have no answer outstanding.
    /// Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, c| c.pending > 0 || now.duration_since(c.last_active) < self.ttl);
        before - guard.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
