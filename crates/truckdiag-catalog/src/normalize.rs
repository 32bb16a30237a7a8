/// Build the comparison key for a term or catalog field.
///
/// Lowercases the input and keeps only ASCII letters and digits, so
/// `"SID 232"`, `"sid-232"` and `"Sid232"` all yield `"sid232"`.
/// Total and idempotent; empty input yields an empty key.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("SID 232"), "sid232");
        assert_eq!(normalize("sid-232"), "sid232");
        assert_eq!(normalize("5V_SUPPLY"), "5vsupply");
        assert_eq!(normalize("CIRCUIT PROTECTION VALVE (APM)"), "circuitprotectionvalveapm");
    }

    #[test]
    fn test_normalize_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("--- ()"), "");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        assert_eq!(normalize("Pompe à eau"), "pompeeau");
        assert_eq!(normalize("حساس 100"), "100");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in ".*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_output_is_lower_alnum(s in ".*") {
            prop_assert!(normalize(&s)
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }
}
