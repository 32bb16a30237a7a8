//! Error types for truckdiag-oracle

use thiserror::Error;

/// Errors that can occur while calling the oracle
#[derive(Error, Debug)]
pub enum OracleError {
    /// No API credential configured (demo mode)
    #[error("Oracle is not configured: no API key")]
    NotConfigured,

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success status from the API
    #[error("Oracle returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The API refused to answer the prompt
    #[error("Prompt blocked by oracle: {0}")]
    Blocked(String),

    /// A response with no text in it
    #[error("No response from oracle")]
    EmptyResponse,

    /// Response text was not valid JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        OracleError::Http(err.to_string())
    }
}

impl OracleError {
    /// Whether the error means "no oracle" rather than "oracle failed".
    pub fn is_not_configured(&self) -> bool {
        matches!(self, OracleError::NotConfigured)
    }
}
