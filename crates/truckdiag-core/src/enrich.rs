//! Pairs a diagnosis with the catalog part its `part_name` resolves to.

use chrono::{DateTime, Utc};
use serde::Serialize;
use truckdiag_catalog::{CatalogPart, MatchStrategy, PartResolver};

use crate::domain::DiagnosisResult;
use crate::obs;

/// Headline shown when no catalog part matched.
pub const NO_PART_MESSAGE: &str = "Component detected - inspect physically";

/// A diagnosis ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDiagnosis {
    pub diagnosis: DiagnosisResult,
    /// Matched catalog part, if any
    pub part: Option<CatalogPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_strategy: Option<MatchStrategy>,
    pub diagnosed_at: DateTime<Utc>,
}

impl EnrichedDiagnosis {
    /// `"<name> (#<part number>)"`, or [`NO_PART_MESSAGE`].
    pub fn part_headline(&self) -> String {
        match &self.part {
            Some(part) => format!("{} (#{})", part.name, part.part_number),
            None => NO_PART_MESSAGE.to_string(),
        }
    }
}

/// Resolve `diagnosis.part_name` and attach the result.
pub fn enrich(diagnosis: DiagnosisResult, resolver: &PartResolver<'_>) -> EnrichedDiagnosis {
    let found = resolver.resolve_with_strategy(diagnosis.part_name.as_deref());
    let strategy = found.map(|m| m.strategy.to_string());
    obs::emit_catalog_resolved(
        diagnosis.part_name.as_deref(),
        found.map(|m| m.part.part_number),
        strategy.as_deref(),
    );

    EnrichedDiagnosis {
        part: found.map(|m| *m.part),
        match_strategy: found.map(|m| m.strategy),
        diagnosis,
        diagnosed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::fallback_diagnosis;

    #[test]
    fn test_enrich_fallback() {
        let enriched = enrich(fallback_diagnosis(), &PartResolver::orion());
        let part = enriched.part.expect("5V supply part");
        assert_eq!(part.part_number, "SID232");
        assert_eq!(enriched.part_headline(), "5V SENSOR SUPPLY (ECU) (#SID232)");
    }

    #[test]
    fn test_enrich_without_match() {
        let mut diagnosis = fallback_diagnosis();
        diagnosis.part_name = Some("ECU Unit".to_string());
        let enriched = enrich(diagnosis, &PartResolver::orion());
        assert!(enriched.part.is_none());
        assert!(enriched.match_strategy.is_none());
        assert_eq!(enriched.part_headline(), NO_PART_MESSAGE);
    }

    #[test]
    fn test_enrich_without_part_name() {
        let mut diagnosis = fallback_diagnosis();
        diagnosis.part_name = None;
        let enriched = enrich(diagnosis, &PartResolver::orion());
        assert!(enriched.part.is_none());
    }

    #[test]
    fn test_serialized_part_hides_category() {
        let enriched = enrich(fallback_diagnosis(), &PartResolver::orion());
        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["part"]["partNumber"], "SID232");
        assert!(value["part"].get("category").is_none());
        assert!(value["diagnosedAt"].is_string());
    }
}
