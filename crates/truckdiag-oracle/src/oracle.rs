//! The oracle capability.
//!
//! Two calls: structured generation (prompt + optional image + response
//! schema → JSON object) and free-form chat (history + message → text).
//! Implementations must be safe to share across tasks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One prior turn as sent to the oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleTurn {
    pub role: ChatRole,
    pub text: String,
}

/// Raw image bytes plus their MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl std::fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.data.len())
            .finish()
    }
}

impl InlineImage {
    /// Wrap bytes, detecting the MIME type from magic bytes.
    ///
    /// Recognises PNG, GIF and WebP; anything else is sent as JPEG.
    pub fn sniff(data: Vec<u8>) -> Self {
        let mime_type = if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            "image/png"
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            "image/gif"
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            "image/webp"
        } else {
            "image/jpeg"
        };
        InlineImage {
            mime_type: mime_type.to_string(),
            data,
        }
    }
}

/// Structured-generation call.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    /// Full task prompt
    pub prompt: String,
    /// Optional image, placed ahead of the prompt
    pub image: Option<InlineImage>,
    /// Response schema the output object must satisfy
    pub schema: serde_json::Value,
}

impl StructuredRequest {
    pub fn new(prompt: impl Into<String>, schema: serde_json::Value) -> Self {
        StructuredRequest {
            prompt: prompt.into(),
            image: None,
            schema,
        }
    }

    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Free-form chat call.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system_instruction: String,
    pub history: Vec<OracleTurn>,
    pub message: String,
}

/// External generative-AI service.
///
/// Guarantees:
/// - `generate_structured` returns a JSON object or an error, never panics.
/// - `chat` returns the model's text continuation or an error.
/// - Neither call imposes its own timeout beyond the transport defaults.
#[async_trait]
pub trait DiagnosisOracle: Send + Sync {
    /// Generate a JSON value constrained by `request.schema`.
    async fn generate_structured(&self, request: StructuredRequest) -> Result<serde_json::Value>;

    /// Continue a conversation.
    async fn chat(&self, request: ChatRequest) -> Result<String>;
}
