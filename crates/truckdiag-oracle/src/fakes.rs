//! In-memory fakes for the oracle trait (testing only)
//!
//! Provides `ScriptedOracle`, which replays queued responses and records
//! every request, and `FailingOracle`, which fails every call.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::OracleError;
use crate::oracle::{ChatRequest, DiagnosisOracle, StructuredRequest};
use crate::Result;

#[derive(Debug)]
enum Scripted<T> {
    Ok(T),
    Fail(String),
}

// ---------------------------------------------------------------------------
// ScriptedOracle
// ---------------------------------------------------------------------------

/// Oracle that replays queued answers in order.
///
/// An exhausted queue answers with `OracleError::EmptyResponse`.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    structured: Mutex<VecDeque<Scripted<serde_json::Value>>>,
    replies: Mutex<VecDeque<Scripted<String>>>,
    structured_calls: Mutex<Vec<StructuredRequest>>,
    chat_calls: Mutex<Vec<ChatRequest>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a structured answer.
    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.structured.lock().unwrap().push_back(Scripted::Ok(value));
        self
    }

    /// Queue a structured failure.
    pub fn with_structured_failure(self, reason: &str) -> Self {
        self.structured
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(reason.to_string()));
        self
    }

    /// Queue a chat reply.
    pub fn with_reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Scripted::Ok(text.to_string()));
        self
    }

    /// Queue a chat failure.
    pub fn with_chat_failure(self, reason: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Scripted::Fail(reason.to_string()));
        self
    }

    /// Structured requests received so far.
    pub fn structured_calls(&self) -> Vec<StructuredRequest> {
        self.structured_calls.lock().unwrap().clone()
    }

    /// Chat requests received so far.
    pub fn chat_calls(&self) -> Vec<ChatRequest> {
        self.chat_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiagnosisOracle for ScriptedOracle {
    async fn generate_structured(&self, request: StructuredRequest) -> Result<serde_json::Value> {
        self.structured_calls.lock().unwrap().push(request);
        match self.structured.lock().unwrap().pop_front() {
            Some(Scripted::Ok(value)) => Ok(value),
            Some(Scripted::Fail(reason)) => Err(OracleError::Http(reason)),
            None => Err(OracleError::EmptyResponse),
        }
    }

    async fn chat(&self, request: ChatRequest) -> Result<String> {
        self.chat_calls.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Scripted::Ok(text)) => Ok(text),
            Some(Scripted::Fail(reason)) => Err(OracleError::Http(reason)),
            None => Err(OracleError::EmptyResponse),
        }
    }
}

// ---------------------------------------------------------------------------
// FailingOracle
// ---------------------------------------------------------------------------

/// Oracle whose every call fails with a transport error.
#[derive(Debug, Clone)]
pub struct FailingOracle {
    reason: String,
}

impl FailingOracle {
    pub fn new(reason: impl Into<String>) -> Self {
        FailingOracle {
            reason: reason.into(),
        }
    }
}

impl Default for FailingOracle {
    fn default() -> Self {
        Self::new("connection refused")
    }
}

#[async_trait]
impl DiagnosisOracle for FailingOracle {
    async fn generate_structured(&self, _request: StructuredRequest) -> Result<serde_json::Value> {
        Err(OracleError::Http(self.reason.clone()))
    }

    async fn chat(&self, _request: ChatRequest) -> Result<String> {
        Err(OracleError::Http(self.reason.clone()))
    }
}
