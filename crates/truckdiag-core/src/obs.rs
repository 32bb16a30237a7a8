//! Structured observability hooks for diagnosis lifecycle events.
//!
//! This module provides:
//! - A request-scoped span via [`diagnosis_span`], attached to the request
//!   future with `tracing::Instrument`
//! - Emission functions for key lifecycle events: start, fallback,
//!   rejection, finish, catalog resolution, chat failure
//!
//! Events are emitted at `info!` level unless noted (configurable via the
//! `TRUCKDIAG_LOG` env var). Image bytes are never logged; use
//! [`image_fingerprint`] to correlate them.

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::composer::{DiagnosisMode, DiagnosisSource};
use crate::domain::Severity;

/// Span covering one diagnosis or chat request.
///
/// # Example
///
/// ```ignore
/// use tracing::Instrument;
/// let id = uuid::Uuid::new_v4().to_string();
/// async { /* ... */ }.instrument(diagnosis_span(&id, DiagnosisMode::Code)).await;
/// ```
pub fn diagnosis_span(request_id: &str, mode: DiagnosisMode) -> tracing::Span {
    tracing::info_span!("truckdiag.diagnosis", request_id = %request_id, mode = %mode)
}

/// Emit event: diagnosis started.
pub fn emit_diagnosis_started(mode: DiagnosisMode, brand: &str, model: Option<&str>) {
    info!(
        event = "diagnosis.started",
        mode = %mode,
        brand = %brand,
        model = model.unwrap_or("-"),
    );
}

/// Emit event: diagnosis finished.
pub fn emit_diagnosis_finished(
    mode: DiagnosisMode,
    source: DiagnosisSource,
    severity: Severity,
    duration_ms: u64,
) {
    info!(
        event = "diagnosis.finished",
        mode = %mode,
        source = %source,
        severity = %severity,
        duration_ms = duration_ms,
    );
}

/// Emit event: fallback substituted for an oracle failure (warning level).
pub fn emit_diagnosis_fallback(mode: DiagnosisMode, reason: &dyn std::fmt::Display) {
    warn!(event = "diagnosis.fallback", mode = %mode, reason = %reason);
}

/// Emit event: demo mode answered without an oracle.
pub fn emit_demo_mode(mode: DiagnosisMode) {
    info!(event = "diagnosis.demo", mode = %mode);
}

/// Emit event: the oracle rejected the photo.
pub fn emit_diagnosis_rejected(fingerprint: &str) {
    info!(event = "diagnosis.rejected", image = %fingerprint);
}

/// Emit event: a diagnosis part name resolved (or not) against the catalog.
pub fn emit_catalog_resolved(term: Option<&str>, part_number: Option<&str>, strategy: Option<&str>) {
    info!(
        event = "catalog.resolved",
        term = term.unwrap_or("-"),
        part_number = part_number.unwrap_or("-"),
        strategy = strategy.unwrap_or("-"),
    );
}

/// Emit event: chat call failed (warning level).
pub fn emit_chat_failed(error: &dyn std::fmt::Display) {
    warn!(event = "chat.failed", error = %error);
}

/// Short SHA-256 fingerprint of an image payload.
pub fn image_fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..6])
}
