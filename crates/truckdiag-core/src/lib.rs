//! Truckdiag Core Library
//!
//! Turns fault codes, photos and chat messages into diagnoses, and pairs
//! each diagnosis with a part from the OrionPart catalog.
//!
//! ## Layer 2 - Domain
//!
//! Focus: Prompting, fallback policy, and catalog enrichment.

pub mod composer;
pub mod domain;
pub mod enrich;
pub mod fallback;
pub mod obs;
pub mod prompt;
pub mod scope;
pub mod search;
pub mod telemetry;

pub use composer::{ComposerSettings, DiagnosisComposer, DiagnosisMode, DiagnosisSource};
pub use domain::{
    ChatTurn, DiagnosisError, DiagnosisResult, FaultCodeData, Language, Result, Severity,
    TruckBrand,
};
pub use enrich::{enrich, EnrichedDiagnosis, NO_PART_MESSAGE};
pub use fallback::{fallback_diagnosis, CONNECTION_ERROR_REPLY, DEMO_CHAT_REPLY};
pub use scope::{run_scoped, RequestScope};
pub use search::{route_search, SearchRoute};
pub use telemetry::init_tracing;

pub use truckdiag_catalog::{
    resolve_part, Catalog, CatalogPart, MatchStrategy, PartResolver, KEYWORD_RULES,
};
pub use truckdiag_oracle::{ChatRole, DiagnosisOracle, OracleConfig};
