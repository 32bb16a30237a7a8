//! Routing for the dashboard search box.

use serde::Serialize;

/// Where a search term should be handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum SearchRoute {
    /// Fault-code decoder
    Decoder,
    /// Sensors guide, pre-filtered by `term`
    Sensors { term: String },
}

/// Route a search term.
///
/// An empty term goes nowhere. A term with a digit is a code: PID/SID
/// codes go to the sensors guide, anything else to the decoder. Terms
/// without digits, whitespace included, are component names and go to the
/// sensors guide as typed.
pub fn route_search(term: &str) -> Option<SearchRoute> {
    if term.is_empty() {
        return None;
    }

    let has_digit = term.chars().any(|c| c.is_ascii_digit());
    let lower = term.to_ascii_lowercase();
    if has_digit && !(lower.contains("pid") || lower.contains("sid")) {
        return Some(SearchRoute::Decoder);
    }
    Some(SearchRoute::Sensors {
        term: term.to_string(),
    })
}
