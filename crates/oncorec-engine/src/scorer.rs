//! Weighted per-record match scoring and confidence.

use oncorec_common::TreatmentRecord;
use serde::Serialize;

use crate::normalise::{normalise_scalar, ClinicalTokeniser, NormalisedQuery};
use crate::weights::FieldWeights;

/// A record paired with its match score for one query. Ephemeral:
/// produced fresh per query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate<'a> {
    pub record: &'a TreatmentRecord,
    pub score: u32,
}

/// Containment match: true iff `field == value` or either string contains
/// the other. Deliberately favours recall over precision — clinical
/// abbreviations vary in specificity in either direction.
///
/// Both sides must be non-empty: an absent record field or query value
/// contributes zero rather than matching everything.
pub fn containment_match(field: &str, value: &str) -> bool {
    if field.is_empty() || value.is_empty() {
        return false;
    }
    field == value || field.contains(value) || value.contains(field)
}

/// True if any supplied value matches the record field. OR semantics
/// across a multi-valued input: the caller adds the field weight at most
/// once, regardless of how many values match.
fn any_match(field: &str, values: &[String]) -> bool {
    values.iter().any(|v| containment_match(field, v))
}

/// Score one record against a normalised query.
///
/// Each field contributes its weight at most once; the clinical component
/// counts distinct query tokens literally present in the record's
/// tokenised clinical text, `clinical_per_token` points each, capped at
/// `clinical_cap`. Total function: sparse records and empty sub-fields
/// contribute zero, never an error.
pub fn score_record(
    record: &TreatmentRecord,
    query: &NormalisedQuery,
    weights: &FieldWeights,
    tokeniser: &ClinicalTokeniser,
) -> u32 {
    let mut score = 0;

    let record_gene = normalise_scalar(&record.gene);
    let record_mutation = normalise_scalar(&record.mutation);
    let record_cancer = normalise_scalar(&record.cancer_type);
    let record_stage = normalise_scalar(&record.stage);

    if any_match(&record_gene, &query.genes) {
        score += weights.gene;
    }

    if any_match(&record_mutation, &query.mutations) {
        score += weights.mutation;
    }

    if containment_match(&record_cancer, &query.cancer_type) {
        score += weights.cancer;
    }

    if containment_match(&record_stage, &query.stage) {
        score += weights.stage;
    }

    if !query.clinical_tokens.is_empty() {
        let record_tokens = tokeniser.tokenise(&record.clinical_info);
        let matched = query
            .clinical_tokens
            .iter()
            .filter(|t| record_tokens.contains(t))
            .count() as u32;
        score += (matched * weights.clinical_per_token).min(weights.clinical_cap);
    }

    score
}

/// Bounded confidence percentage for a score:
/// `round(min(100, score / max_score × 100))`.
///
/// Pure and deterministic; monotonic in score; 0 at score 0 and 100 at
/// the maximum achievable score. A percentage communicating match
/// strength, not a probability.
pub fn confidence_percent(score: u32, weights: &FieldWeights) -> u32 {
    let max = weights.max_score();
    if max == 0 {
        return 0;
    }
    let pct = (score as f64 / max as f64) * 100.0;
    pct.min(100.0).round() as u32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
