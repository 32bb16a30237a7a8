//! Keyword fast-path rules.
//!
//! Each rule binds a conjunction of required substrings to exactly one
//! catalog category. A rule only ever selects parts of its own category;
//! it never overrides the category/name strategies of earlier parts.

/// A conjunction of keywords that, when all present in a normalized term,
/// selects parts of `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Lowercase alphanumeric keywords, all of which must appear in the term
    pub all_of: &'static [&'static str],
    /// Target catalog category (compared verbatim, not normalized)
    pub category: &'static str,
}

impl KeywordRule {
    pub const fn new(all_of: &'static [&'static str], category: &'static str) -> Self {
        KeywordRule { all_of, category }
    }

    /// Whether every keyword occurs in the already-normalized `term`.
    pub fn matches(&self, term: &str) -> bool {
        !self.all_of.is_empty() && self.all_of.iter().all(|k| term.contains(k))
    }
}

/// The built-in rule set.
pub static KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule::new(&["sid", "232"], "5v_supply"),
    KeywordRule::new(&["5v", "supply"], "5v_supply"),
    KeywordRule::new(&["oil", "pressure"], "oil_sensor"),
    KeywordRule::new(&["speed", "sensor"], "speed_sensor"),
    KeywordRule::new(&["nox"], "nox"),
    KeywordRule::new(&["compressor"], "compressor"),
    KeywordRule::new(&["brake", "valve"], "brake_valve"),
    KeywordRule::new(&["modulator"], "modulator"),
    KeywordRule::new(&["apm"], "apm"),
    KeywordRule::new(&["feed"], "feed_pump"),
    KeywordRule::new(&["fuel", "pump"], "feed_pump"),
    KeywordRule::new(&["water", "pump"], "water_pump"),
    KeywordRule::new(&["expansion"], "expansion_tank"),
    KeywordRule::new(&["tilt", "pump"], "tilt_pump"),
    KeywordRule::new(&["servo"], "servo_pump"),
    KeywordRule::new(&["rod"], "tie_rod"),
    KeywordRule::new(&["filter", "fuel"], "fuel_filter"),
    KeywordRule::new(&["harness"], "harness"),
];

/// Whether any rule in `rules` both matches `term` and targets `category`.
pub fn selects(rules: &[KeywordRule], term: &str, category: &str) -> bool {
    rules
        .iter()
        .any(|rule| rule.category == category && rule.matches(term))
}

/// Categories selected by `term`, in rule order, without duplicates.
pub fn categories_for(rules: &[KeywordRule], term: &str) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for rule in rules.iter().filter(|r| r.matches(term)) {
        if !out.contains(&rule.category) {
            out.push(rule.category);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_requires_every_keyword() {
        let rule = KeywordRule::new(&["oil", "pressure"], "oil_sensor");
        assert!(rule.matches("lowoilpressure"));
        assert!(!rule.matches("oillevel"));
        assert!(!rule.matches("pressure"));
    }

    #[test]
    fn test_empty_rule_never_matches() {
        assert!(!KeywordRule::new(&[], "x").matches("anything"));
    }

    #[test]
    fn test_rule_table_covers_expected_categories() {
        let expected = [
            "5v_supply",
            "oil_sensor",
            "speed_sensor",
            "nox",
            "compressor",
            "brake_valve",
            "modulator",
            "apm",
            "feed_pump",
            "water_pump",
            "expansion_tank",
            "tilt_pump",
            "servo_pump",
            "tie_rod",
            "fuel_filter",
            "harness",
        ];
        for category in expected {
            assert!(
                KEYWORD_RULES.iter().any(|r| r.category == category),
                "no rule for {category}"
            );
        }
        assert!(KEYWORD_RULES.len() >= 16);
    }

    #[test]
    fn test_keywords_are_normalized_form() {
        for rule in KEYWORD_RULES {
            for keyword in rule.all_of {
                assert_eq!(crate::normalize(keyword), *keyword);
            }
        }
    }

    #[test]
    fn test_sid_232_selects_5v_supply() {
        assert_eq!(categories_for(KEYWORD_RULES, "mid128sid232fmi3"), vec!["5v_supply"]);
        assert!(selects(KEYWORD_RULES, "5vsensorsupply", "5v_supply"));
        assert!(!selects(KEYWORD_RULES, "5vsensorsupply", "oil_sensor"));
    }

    #[test]
    fn test_fuel_pump_and_filter_are_distinct() {
        assert_eq!(categories_for(KEYWORD_RULES, "fuelpump"), vec!["feed_pump"]);
        assert_eq!(categories_for(KEYWORD_RULES, "fuelfilter"), vec!["fuel_filter"]);
        assert_eq!(
            categories_for(KEYWORD_RULES, "fuelpumpfilter"),
            vec!["feed_pump", "fuel_filter"]
        );
    }

    #[test]
    fn test_unrelated_term_selects_nothing() {
        assert!(categories_for(KEYWORD_RULES, "xyznonexistentpart").is_empty());
    }
}
