// src/services/answer.rs
// Turns a member's question into a display-ready reply by way of an
// external text-generation API.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::PortalConfig;

/// Shown when no API credential is configured. Tamil like every other
/// user-facing reply, with the English operator notice appended.
pub const MISSING_KEY_REPLY: &str = "API விசை அமைக்கப்படவில்லை. தயவுசெய்து சூழல் அமைப்பைச் சரிபார்க்கவும். (API Key is missing. Please configure the environment.)";
/// Shown when the model returns no text. Whitespace-only text counts as no
/// text, so a blank bubble is never rendered.
pub const EMPTY_ANSWER_REPLY: &str = "மன்னிக்கவும், என்னால் பதில் அளிக்க முடியவில்லை.";
pub const FAILURE_REPLY: &str =
    "தொழில்நுட்ப கோளாறு காரணமாக பதில் பெற முடியவில்லை. சிறிது நேரம் கழித்து முயற்சிக்கவும்.";

pub const SYSTEM_INSTRUCTION: &str = "You are an expert business consultant for the Tamil Vanigar Peravai (Tamil Merchant Association).
Answer questions about commerce, business history, tax regulations, and entrepreneurship in Tamil.
Keep answers concise, professional, and encouraging.
Use Tamil script.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub api_key: String,
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Something that can produce text for a prompt. `Ok(None)` means the
/// backend answered but had no text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, GenerationError>;
}

#[derive(Clone)]
pub struct AnswerService {
    api_key: Option<String>,
    model: String,
    backend: Arc<dyn TextGenerator>,
}

impl AnswerService {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        backend: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            backend,
        }
    }

    /// Wires the service to Gemini using the portal config.
    pub fn from_config(config: &PortalConfig) -> Result<Self, GenerationError> {
        let client = GeminiClient::new(config.base_url.clone(), config.answer_timeout)?;
        Ok(Self::new(config.api_key.clone(), config.model.clone(), Arc::new(client)))
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Always returns something the chat view can show.
    pub async fn answer(&self, question: &str) -> String {
        let Some(api_key) = &self.api_key else {
            return MISSING_KEY_REPLY.to_string();
        };

        let request = GenerationRequest {
            api_key: api_key.clone(),
            model: self.model.clone(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: question.to_string(),
        };

        match self.backend.generate(&request).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_ANSWER_REPLY.to_string(),
            Err(e) => {
                error!(error = %e, model = %self.model, "answer generation failed");
                FAILURE_REPLY.to_string()
            }
        }
    }
}

/// REST client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, request.model);
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: request.system_instruction.clone() }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: request.prompt.clone() }],
            }],
        };

        debug!(%url, "calling generateContent");
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &request.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            return Err(GenerationError::Status { status, message: error_message(&raw) });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| GenerationError::Decode(e.to_string()))?;
        Ok(extract_text(parsed))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

// Text parts of the first candidate, joined.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() { None } else { Some(text) }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|w| match (w.error.status, w.error.message) {
            (Some(s), Some(m)) => format!("{s}: {m}"),
            (_, Some(m)) => m,
            (Some(s), None) => s,
            (None, None) => body.to_string(),
        })
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_tamil(c: char) -> bool {
        ('\u{0B80}'..='\u{0BFF}').contains(&c)
    }

    #[test]
    fn every_fixed_reply_is_tamil() {
        for reply in [MISSING_KEY_REPLY, EMPTY_ANSWER_REPLY, FAILURE_REPLY] {
            assert!(reply.chars().any(is_tamil), "{reply}");
        }
        assert!(MISSING_KEY_REPLY.ends_with("(API Key is missing. Please configure the environment.)"));
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"வணக்கம்"},{"text":" நண்பரே"}]}},
                              {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(parsed).as_deref(), Some("வணக்கம் நண்பரே"));
    }

    #[test]
    fn no_candidates_means_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(parsed).is_none());

        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(extract_text(parsed).is_none());
    }

    #[test]
    fn error_message_prefers_api_status() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "PERMISSION_DENIED: API key not valid");
        assert_eq!(error_message("gateway down"), "gateway down");
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateContentRequest {
            system_instruction: Content { role: None, parts: vec![Part { text: "sys".into() }] },
            contents: vec![Content { role: Some("user"), parts: vec![Part { text: "q".into() }] }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "q");
    }
}
