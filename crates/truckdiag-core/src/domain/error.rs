//! Domain-level error taxonomy for Truckdiag.
//!
//! Oracle call failures never appear here: the composer recovers from
//! them. What remains are failures the caller must act on.

use truckdiag_catalog::CatalogError;
use truckdiag_oracle::OracleError;

/// Truckdiag domain errors.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosisError {
    #[error("image is not a dashboard, scanner screen or truck part")]
    InvalidImage,

    #[error("invalid fault code: {0}")]
    InvalidFaultCode(String),

    #[error("unknown truck brand: {0}")]
    UnknownBrand(String),

    #[error("unsupported language: {0}")]
    UnknownLanguage(String),

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("oracle setup failed: {0}")]
    OracleSetup(#[from] OracleError),
}

impl DiagnosisError {
    pub fn is_invalid_image(&self) -> bool {
        matches!(self, DiagnosisError::InvalidImage)
    }
}

/// Result type for Truckdiag domain operations.
pub type Result<T> = std::result::Result<T, DiagnosisError>;
