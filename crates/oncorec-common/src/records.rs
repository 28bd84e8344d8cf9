//! Core entity types for the treatment-recommendation corpus.
//! These are Rust representations of the static JSON record objects.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Treatment record
// ---------------------------------------------------------------------------

/// One entry in the static treatment corpus.
///
/// Field strings default to empty when absent from the source JSON; a
/// record with sparse fields is scored on whatever is present, never
/// rejected. At least one of `recommended_drug` /
/// `recommended_combination` should be set for the record to contribute
/// to fallback statistics, but absence is tolerated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TreatmentRecord {
    #[serde(default)]
    pub gene: String,
    #[serde(default)]
    pub mutation: String,
    #[serde(default)]
    pub cancer_type: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub clinical_info: String,
    /// Single recommended drug, e.g. "Osimertinib".
    pub recommended_drug: Option<String>,
    /// Ordered combination regimen; internal order is meaningful.
    pub recommended_combination: Option<Vec<String>>,
    /// Free-text effectiveness note carried through into reports.
    pub drug_effectiveness_info: Option<String>,
}

impl TreatmentRecord {
    /// Drug name this record contributes to global frequency statistics:
    /// the single recommended drug, or the first combination entry.
    pub fn fallback_drug(&self) -> Option<&str> {
        self.recommended_drug
            .as_deref()
            .or_else(|| {
                self.recommended_combination
                    .as_deref()
                    .and_then(|c| c.first().map(String::as_str))
            })
            .filter(|d| !d.is_empty())
    }

    /// Does this record carry any treatment recommendation at all?
    pub fn has_recommendation(&self) -> bool {
        self.fallback_drug().is_some()
    }
}

// ---------------------------------------------------------------------------
// Patient query
// ---------------------------------------------------------------------------

/// The five raw strings a caller submits per query.
///
/// `genes` and `mutations` are comma-separated multi-value entries;
/// `cancer_type` and `stage` are single values; `clinical_notes` is
/// unstructured prose. All fields may be empty — empty sub-fields simply
/// contribute nothing to the score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientQuery {
    pub genes: String,
    pub mutations: String,
    pub cancer_type: String,
    pub stage: String,
    pub clinical_notes: String,
}

impl PatientQuery {
    pub fn new(
        genes: &str,
        mutations: &str,
        cancer_type: &str,
        stage: &str,
        clinical_notes: &str,
    ) -> Self {
        Self {
            genes: genes.to_string(),
            mutations: mutations.to_string(),
            cancer_type: cancer_type.to_string(),
            stage: stage.to_string(),
            clinical_notes: clinical_notes.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
