//! Structured diagnosis shown to the user.

use serde::{Deserialize, Serialize};

/// How urgently the fault needs attention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "High", alias = "HIGH")]
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One diagnosis, created per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    /// Subsystem label, e.g. "Engine Management System (MID 128)"
    pub system: String,
    pub description: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    /// Repair steps, in the order they should be carried out
    pub solutions: Vec<String>,
    pub severity: Severity,
    /// Component name as reported by the diagnosis source; the catalog
    /// lookup key, not guaranteed to match any entry verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_name: Option<String>,
}
