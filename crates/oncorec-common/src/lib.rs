//! oncorec-common — Shared types and errors used across all Oncorec crates.

pub mod error;
pub mod records;

// Re-export commonly used types
pub use error::{OncorecError, Result};
pub use records::{PatientQuery, TreatmentRecord};
