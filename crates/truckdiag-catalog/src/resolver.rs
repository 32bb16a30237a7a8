//! Part resolution.
//!
//! Walks the catalog in declaration order and returns the first part
//! satisfied by any strategy. Strategies are tried per part, so an early
//! part matched by a keyword rule beats a later part whose name matches
//! exactly. This is a precedence order, not a ranking.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, CatalogPart};
use crate::normalize::normalize;
use crate::rules::{self, KeywordRule, KEYWORD_RULES};

/// Which check selected a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Term and category key contain one another
    Category,
    /// Term and name key contain one another
    Name,
    /// A keyword rule targeting the part's category fired
    Keyword,
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStrategy::Category => "category",
            MatchStrategy::Name => "name",
            MatchStrategy::Keyword => "keyword",
        };
        write!(f, "{}", s)
    }
}

/// A resolved part together with the strategy that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartMatch<'a> {
    pub part: &'a CatalogPart,
    pub strategy: MatchStrategy,
}

/// Resolver over a catalog and a keyword rule set.
#[derive(Debug, Clone, Copy)]
pub struct PartResolver<'a> {
    catalog: Catalog<'a>,
    rules: &'a [KeywordRule],
}

impl PartResolver<'static> {
    /// Resolver over the built-in catalog and rule table.
    pub fn orion() -> Self {
        PartResolver::new(Catalog::orion(), KEYWORD_RULES)
    }
}

impl Default for PartResolver<'static> {
    fn default() -> Self {
        Self::orion()
    }
}

impl<'a> PartResolver<'a> {
    pub const fn new(catalog: Catalog<'a>, rules: &'a [KeywordRule]) -> Self {
        PartResolver { catalog, rules }
    }

    pub fn catalog(&self) -> Catalog<'a> {
        self.catalog
    }

    pub fn rules(&self) -> &'a [KeywordRule] {
        self.rules
    }

    /// Resolve `term` to at most one part.
    ///
    /// `None` for a missing or empty term and when nothing matches. A term
    /// with no letters or digits normalizes to the empty key, which every
    /// key contains, so it resolves to the first declared part. Never fails.
    pub fn resolve(&self, term: Option<&str>) -> Option<&'a CatalogPart> {
        self.resolve_with_strategy(term).map(|m| m.part)
    }

    /// Like [`resolve`](Self::resolve), also reporting which strategy fired.
    pub fn resolve_with_strategy(&self, term: Option<&str>) -> Option<PartMatch<'a>> {
        let raw = term.filter(|t| !t.is_empty())?;
        let term = normalize(raw);

        let found = self.catalog.iter().find_map(|part| {
            self.strategy_for(part, &term)
                .map(|strategy| PartMatch { part, strategy })
        });

        match &found {
            Some(m) => debug!(
                term = %raw,
                part_number = %m.part.part_number,
                strategy = %m.strategy,
                "catalog part resolved"
            ),
            None => debug!(term = %raw, "no catalog part matched"),
        }
        found
    }

    fn strategy_for(&self, part: &CatalogPart, term: &str) -> Option<MatchStrategy> {
        if contains_either(term, &normalize(part.category)) {
            Some(MatchStrategy::Category)
        } else if contains_either(term, &normalize(part.name)) {
            Some(MatchStrategy::Name)
        } else if rules::selects(self.rules, term, part.category) {
            Some(MatchStrategy::Keyword)
        } else {
            None
        }
    }
}

fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Resolve `term` against the built-in catalog.
pub fn resolve_part(term: Option<&str>) -> Option<&'static CatalogPart> {
    PartResolver::orion().resolve(term)
}
