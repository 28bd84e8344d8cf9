//! oncorec-engine — Weighted multi-field matching and ranking engine.
//!
//! Scores a static corpus of treatment-recommendation records against a
//! clinician-entered query and produces a tiered recommendation: best
//! scored matches, then a relaxed mutation-only match, then a global
//! drug-frequency fallback. The cascade never answers "nothing" — only
//! increasingly generic suggestions, with the tier and confidence
//! signalling how trustworthy they are.

pub mod cascade;
pub mod normalise;
pub mod report;
pub mod scorer;
pub mod weights;

pub use cascade::{DrugFrequency, MatchTier, RankingResult, RELAXED_MUTATION_SCORE};
pub use report::{CandidateReport, RecommendationEngine, RecommendationReport};
pub use scorer::{confidence_percent, ScoredCandidate};
pub use weights::FieldWeights;
