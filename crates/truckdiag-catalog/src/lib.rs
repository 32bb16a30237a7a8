//! Truckdiag-Catalog: OrionPart Spare Parts Catalog
//!
//! This crate holds the static spare-parts catalog and the resolver that
//! maps a fault-code string or free-text component name onto one part.
//!
//! ## Layer 0 - Data
//!
//! Focus: Deterministic, side-effect free lookups over read-only data.
//!
//! ## Key Components
//!
//! - `Catalog`: Ordered, immutable table of `CatalogPart` records
//! - `normalize`: Case- and punctuation-insensitive comparison key
//! - `KEYWORD_RULES`: Declarative keyword → category fast-path table
//! - `PartResolver`: First-match-wins resolution over the catalog

mod catalog;
mod error;
mod normalize;
mod resolver;
pub mod rules;

pub use catalog::{Catalog, CatalogPart, ORION_CATALOG};
pub use error::CatalogError;
pub use normalize::normalize;
pub use resolver::{resolve_part, MatchStrategy, PartMatch, PartResolver};
pub use rules::{KeywordRule, KEYWORD_RULES};

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
