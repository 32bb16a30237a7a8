//! Truckdiag domain model.
//!
//! Inputs the UI hands to the core (fault codes, brand, model, language,
//! chat history) and the structured diagnosis it gets back.

pub mod chat;
pub mod diagnosis;
pub mod error;
pub mod fault_code;
pub mod vehicle;

pub use chat::ChatTurn;
pub use diagnosis::{DiagnosisResult, Severity};
pub use error::{DiagnosisError, Result};
pub use fault_code::FaultCodeData;
pub use vehicle::{Language, TruckBrand};
