//! Error types for truckdiag-catalog

use thiserror::Error;

/// Integrity violations detected when validating a catalog table.
///
/// Resolution itself never fails; these only surface from
/// [`Catalog::validate`](crate::Catalog::validate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two records share a part number
    #[error("duplicate part number: {part_number}")]
    DuplicatePartNumber { part_number: String },

    /// A keyword rule points at a category no part carries
    #[error("keyword rule {keywords:?} targets unknown category: {category}")]
    UnknownRuleCategory {
        category: String,
        keywords: Vec<String>,
    },

    /// A name or category normalizes to the empty string and would match any term
    #[error("part {part_number} has an empty {field} after normalization")]
    EmptyMatchKey {
        part_number: String,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::DuplicatePartNumber {
            part_number: "301250".to_string(),
        };
        assert!(err.to_string().contains("301250"));

        let err = CatalogError::UnknownRuleCategory {
            category: "turbo".to_string(),
            keywords: vec!["turbo".to_string()],
        };
        assert!(err.to_string().contains("unknown category: turbo"));
    }
}
