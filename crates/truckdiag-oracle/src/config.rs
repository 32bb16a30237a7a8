//! Oracle configuration
//!
//! Credentials come from the environment. A missing key is not an error:
//! it puts the application in demo mode.

use serde::{Deserialize, Serialize};

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Oracle configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// API key; `None` means demo mode
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub endpoint: String,
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        OracleConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl OracleConfig {
    /// Create config with an API key and default model/endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        OracleConfig {
            api_key: non_blank(Some(api_key.into())),
            ..Self::default()
        }
    }

    /// Create a new config from environment variables
    ///
    /// Reads `GEMINI_API_KEY` (falling back to `API_KEY`), `TRUCKDIAG_MODEL`
    /// and `TRUCKDIAG_ENDPOINT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = non_blank(lookup("GEMINI_API_KEY")).or_else(|| non_blank(lookup("API_KEY")));
        OracleConfig {
            api_key,
            model: non_blank(lookup("TRUCKDIAG_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: non_blank(lookup("TRUCKDIAG_ENDPOINT"))
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    /// Set model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Whether a credential is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
