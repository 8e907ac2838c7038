// src/message.rs
use serde::{Deserialize, Serialize};

use crate::services::chat_log::ChatMessage;
use crate::services::session_store::{Identity, MemberCategory};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub chat_id: Option<String>,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub chat_id: String,
    pub reply: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub category: MemberCategory,
    pub name: String,
    // Accepted and ignored; there is no credential check.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub identity: Identity,
    pub redirect: String,
}

#[derive(Serialize, Deserialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

#[derive(Deserialize)]
pub struct RegisterQuery {
    #[serde(rename = "type")]
    pub tab: Option<String>,
}

/// Registration submission. Fields are taken as-is.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterRequest {
    #[serde(rename = "type")]
    pub tab: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub specialty: Option<String>,
    pub agreed: bool,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub redirect: String,
}
