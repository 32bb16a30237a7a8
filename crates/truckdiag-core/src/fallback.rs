//! Canned answers used when the oracle is unavailable or fails.

use crate::domain::{DiagnosisResult, Severity};

/// Chat reply when no oracle is configured.
pub const DEMO_CHAT_REPLY: &str = "Demo Mode: I cannot chat right now.";

/// Chat reply when the oracle call fails.
pub const CONNECTION_ERROR_REPLY: &str = "Connection Error.";

/// The fixed 5V sensor-supply diagnosis.
///
/// Identical for every input and language. Its `part_name` resolves to
/// catalog part SID232.
pub fn fallback_diagnosis() -> DiagnosisResult {
    DiagnosisResult {
        system: "Engine Management System (MID 128)".to_string(),
        description: "SID 232 Detected: 5V Sensor Supply Voltage Fault. This component provides \
                      power to critical engine sensors (Boost, Oil Pressure)."
            .to_string(),
        symptoms: strings(&[
            "Engine stalling",
            "Multiple sensor codes",
            "Check Engine Light",
        ]),
        causes: strings(&[
            "Short circuit in sensor wiring",
            "Faulty 5V Regulator inside ECU",
            "Damaged sensor shorting the 5V line",
        ]),
        solutions: strings(&[
            "Disconnect sensors one by one to find the short",
            "Check ECU Pin for exactly 5.0V",
            "Inspect engine harness for rubbing",
        ]),
        severity: Severity::High,
        part_name: Some("5V Sensor Supply".to_string()),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use truckdiag_catalog::resolve_part;

    #[test]
    fn test_fallback_is_stable() {
        assert_eq!(fallback_diagnosis(), fallback_diagnosis());
    }

    #[test]
    fn test_fallback_shape() {
        let d = fallback_diagnosis();
        assert_eq!(d.severity, Severity::High);
        assert_eq!(d.solutions.len(), 3);
        assert!(d.description.starts_with("SID 232 Detected"));
    }

    #[test]
    fn test_fallback_part_resolves() {
        let d = fallback_diagnosis();
        let part = resolve_part(d.part_name.as_deref()).expect("fallback part");
        assert_eq!(part.category, "5v_supply");
    }
}
