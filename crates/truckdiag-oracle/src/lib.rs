//! Truckdiag-Oracle: Generative-AI Oracle Client
//!
//! This crate is the only place Truckdiag talks to the outside world. It
//! exposes the oracle as a capability trait so the diagnosis layer can
//! swap the Gemini client for an in-memory fake.
//!
//! ## Layer 1 - External Services
//!
//! Focus: Request encoding, transport errors, and credential handling.
//! Knows nothing about trucks; prompts and schemas are supplied by callers.

mod config;
mod error;
pub mod fakes;
mod gemini;
mod oracle;
pub mod wire;

pub use config::{OracleConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::OracleError;
pub use gemini::GeminiClient;
pub use oracle::{ChatRequest, ChatRole, DiagnosisOracle, InlineImage, OracleTurn, StructuredRequest};

/// Result type for oracle operations
pub type Result<T> = std::result::Result<T, OracleError>;
