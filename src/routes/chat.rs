// src/routes/chat.rs
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::warn;

use crate::{
    content::{self, PageView},
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chat_log::{ChatMessage, GREETING, MessageRole},
    state::SharedState,
};

pub async fn qa_page() -> Json<PageView> {
    Json(content::qa(vec![ChatMessage::new(MessageRole::Assistant, GREETING)]))
}

pub async fn history_handler(
    State(state): State<SharedState>,
    Path(chat_id): Path<String>,
) -> Result<Json<PageView>, AppError> {
    let messages = state
        .chats
        .history(&chat_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("no chat with id {chat_id}")))?;
    Ok(Json(content::qa(messages)))
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let question = payload.message.trim();
    if question.is_empty() {
        return Err(AppError::BadRequest("Message cannot be empty".to_string()));
    }

    let chat_id = match &payload.chat_id {
        Some(id) if !id.trim().is_empty() => state.chats.ensure_chat(id).await,
        _ => state.chats.create_chat().await,
    };

    state.chats.append_question(&chat_id, question).await;

    // The answer lands whenever it resolves; overlapping questions on the
    // same chat append in completion order.
    let reply = state.answers.answer(question).await;
    if state.chats.append_answer(&chat_id, &reply).await.is_none() {
        warn!(%chat_id, "chat vanished before its answer arrived");
    }

    let messages = state.chats.history(&chat_id).await.unwrap_or_default();
    Ok(Json(ChatResponse { chat_id, reply, messages }))
}
