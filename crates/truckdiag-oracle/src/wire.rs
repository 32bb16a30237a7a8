//! Gemini `generateContent` wire format.
//!
//! Only the subset Truckdiag sends and reads is modelled.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::oracle::{ChatRequest, InlineImage, StructuredRequest};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn image(image: &InlineImage) -> Self {
        Part {
            text: None,
            inline_data: Some(Blob {
                mime_type: image.mime_type.clone(),
                data: STANDARD.encode(&image.data),
            }),
        }
    }
}

/// Base64-encoded inline payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    ///
    /// Fails with `Blocked` when the prompt was refused and `EmptyResponse`
    /// when there is no text at all.
    pub fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(OracleError::Blocked(reason));
        }
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Encode a structured request: image part first, then the prompt.
pub fn structured_body(request: &StructuredRequest) -> GenerateContentRequest {
    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &request.image {
        parts.push(Part::image(image));
    }
    parts.push(Part::text(request.prompt.clone()));

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts,
        }],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: request.schema.clone(),
        }),
    }
}

/// Encode a chat request: prior turns, then the new user message.
pub fn chat_body(request: &ChatRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|turn| Content {
            role: Some(turn.role.as_str().to_string()),
            parts: vec![Part::text(turn.text.clone())],
        })
        .collect();
    contents.push(Content {
        role: Some("user".to_string()),
        parts: vec![Part::text(request.message.clone())],
    });

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::text(request.system_instruction.clone())],
        }),
        generation_config: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{ChatRole, OracleTurn};
    use serde_json::json;

    #[test]
    fn test_structured_body_with_image() {
        let request = StructuredRequest::new("diagnose", json!({"type": "OBJECT"}))
            .with_image(InlineImage::sniff(vec![0xFF, 0xD8, 0xFF]));
        let body = serde_json::to_value(structured_body(&request)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "/9j/");
        assert_eq!(parts[1]["text"], "diagnose");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_chat_body_orders_history_then_message() {
        let request = ChatRequest {
            system_instruction: "You are a mechanic".to_string(),
            history: vec![
                OracleTurn {
                    role: ChatRole::User,
                    text: "hello".to_string(),
                },
                OracleTurn {
                    role: ChatRole::Model,
                    text: "hi".to_string(),
                },
            ],
            message: "SID 232?".to_string(),
        };
        let body = serde_json::to_value(chat_body(&request)).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "SID 232?");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are a mechanic");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(response.into_text(), Err(OracleError::EmptyResponse)));
    }

    #[test]
    fn test_blocked_prompt() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        match response.into_text() {
            Err(OracleError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {:?}", other),
        }
    }
}
