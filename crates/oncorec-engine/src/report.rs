//! Result aggregation: merged recommendations and the structured report
//! handed back to the caller.
//!
//! The report is plain data for the presentation layer to render; no
//! escaping or sanitisation happens here. Any consumer rendering these
//! strings into a shared document surface owns neutralising special
//! characters first.

use oncorec_common::{PatientQuery, Result, TreatmentRecord};
use oncorec_corpus::Corpus;
use serde::Serialize;

use crate::cascade::{rank, DrugFrequency, MatchTier, RankingResult};
use crate::normalise::{ClinicalTokeniser, NormalisedQuery};
use crate::scorer::{confidence_percent, ScoredCandidate};
use crate::weights::FieldWeights;

/// Number of top candidates detailed in a matched report.
const REPORT_TOP_N: usize = 3;

/// Merge recommended treatments across candidates in rank order:
/// combination entries (internal order preserved) when present, else the
/// single recommended drug. Deduplicated by exact string equality, first
/// occurrence kept.
pub fn merge_recommendations(candidates: &[ScoredCandidate<'_>]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for candidate in candidates {
        match &candidate.record.recommended_combination {
            Some(combination) => {
                for drug in combination {
                    if !merged.contains(drug) {
                        merged.push(drug.clone());
                    }
                }
            }
            None => {
                if let Some(drug) = &candidate.record.recommended_drug {
                    if !merged.contains(drug) {
                        merged.push(drug.clone());
                    }
                }
            }
        }
    }
    merged
}

/// One matched record as presented to the caller, carrying the fields the
/// report renders plus the per-candidate confidence.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    pub gene: String,
    pub mutation: String,
    pub cancer_type: String,
    pub stage: String,
    pub recommended_drug: Option<String>,
    pub recommended_combination: Option<Vec<String>>,
    pub drug_effectiveness_info: Option<String>,
    pub score: u32,
    pub confidence: u32,
}

impl CandidateReport {
    fn from_candidate(candidate: &ScoredCandidate<'_>, weights: &FieldWeights) -> Self {
        let record: &TreatmentRecord = candidate.record;
        Self {
            gene: record.gene.clone(),
            mutation: record.mutation.clone(),
            cancer_type: record.cancer_type.clone(),
            stage: record.stage.clone(),
            recommended_drug: record.recommended_drug.clone(),
            recommended_combination: record.recommended_combination.clone(),
            drug_effectiveness_info: record.drug_effectiveness_info.clone(),
            score: candidate.score,
            confidence: confidence_percent(candidate.score, weights),
        }
    }
}

/// Structured report for one query.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationReport {
    /// A scored tier matched: top candidates with confidences and the
    /// merged treatment list. Overall confidence is that of the single
    /// best candidate.
    Matched {
        tier: MatchTier,
        overall_confidence: u32,
        /// The best candidate's single recommended drug, when it has one.
        primary_drug: Option<String>,
        combined_recommendations: Vec<String>,
        candidates: Vec<CandidateReport>,
    },
    /// No record matched: generic corpus-wide drug frequencies. Low
    /// confidence by construction; no per-candidate detail. The list is
    /// empty when the corpus holds no drug data at all.
    Generic { drugs: Vec<DrugFrequency> },
}

impl RecommendationReport {
    pub fn is_generic(&self) -> bool {
        matches!(self, RecommendationReport::Generic { .. })
    }
}

/// Build the caller-facing report from a ranking outcome.
pub fn build_report(result: &RankingResult<'_>, weights: &FieldWeights) -> RecommendationReport {
    match result {
        RankingResult::StrictMatches(candidates)
        | RankingResult::RelaxedMutationMatches(candidates) => {
            let top = &candidates[..candidates.len().min(REPORT_TOP_N)];
            let Some(best) = top.first() else {
                // The cascade never emits an empty scored variant; an
                // empty list still degrades to a generic report rather
                // than a panic.
                return RecommendationReport::Generic { drugs: Vec::new() };
            };
            RecommendationReport::Matched {
                tier: result.tier(),
                overall_confidence: confidence_percent(best.score, weights),
                primary_drug: best.record.recommended_drug.clone(),
                combined_recommendations: merge_recommendations(top),
                candidates: top
                    .iter()
                    .map(|c| CandidateReport::from_candidate(c, weights))
                    .collect(),
            }
        }
        RankingResult::FrequencyFallback(drugs) => RecommendationReport::Generic {
            drugs: drugs.clone(),
        },
    }
}

/// The engine entry point: owns the weights and the clinical tokeniser,
/// receives the corpus by reference per query.
pub struct RecommendationEngine {
    weights: FieldWeights,
    tokeniser: ClinicalTokeniser,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::with_weights(FieldWeights::default())
    }

    pub fn with_weights(weights: FieldWeights) -> Self {
        Self {
            weights,
            tokeniser: ClinicalTokeniser::new(),
        }
    }

    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    /// Run the ranking cascade for one query.
    pub fn rank<'a>(&self, corpus: &'a Corpus, query: &PatientQuery) -> Result<RankingResult<'a>> {
        let normalised = NormalisedQuery::from_query(query, &self.tokeniser);
        rank(corpus, &normalised, &self.weights, &self.tokeniser)
    }

    /// Run the cascade and aggregate the outcome into a report.
    pub fn recommend(&self, corpus: &Corpus, query: &PatientQuery) -> Result<RecommendationReport> {
        let result = self.rank(corpus, query)?;
        Ok(build_report(&result, &self.weights))
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use oncorec_common::TreatmentRecord;

    fn candidate(record: &TreatmentRecord, score: u32) -> ScoredCandidate<'_> {
        ScoredCandidate { record, score }
    }

    #[test]
    fn test_merge_prefers_combination_and_dedups() {
        let a = TreatmentRecord {
            recommended_combination: Some(vec!["Carboplatin".into(), "Pemetrexed".into()]),
            recommended_drug: Some("ShouldNotAppear".into()),
            ..Default::default()
        };
        let b = TreatmentRecord {
            recommended_drug: Some("Osimertinib".into()),
            ..Default::default()
        };
        let c = TreatmentRecord {
            recommended_combination: Some(vec!["Pemetrexed".into(), "Cisplatin".into()]),
            ..Default::default()
        };
        let merged = merge_recommendations(&[candidate(&a, 90), candidate(&b, 60), candidate(&c, 40)]);
        assert_eq!(merged, vec!["Carboplatin", "Pemetrexed", "Osimertinib", "Cisplatin"]);
    }

    #[test]
    fn test_merge_skips_records_without_recommendation() {
        let empty = TreatmentRecord::default();
        assert!(merge_recommendations(&[candidate(&empty, 30)]).is_empty());
    }

    #[test]
    fn test_report_takes_top_three_and_best_confidence() {
        let records: Vec<TreatmentRecord> = (0..5)
            .map(|i| TreatmentRecord {
                gene: format!("G{i}"),
                recommended_drug: Some(format!("Drug{i}")),
                ..Default::default()
            })
            .collect();
        let candidates: Vec<ScoredCandidate<'_>> = records
            .iter()
            .zip([95u32, 80, 65, 50, 35])
            .map(|(r, s)| candidate(r, s))
            .collect();
        let weights = FieldWeights::default();
        let result = RankingResult::StrictMatches(candidates);
        let report = build_report(&result, &weights);
        let RecommendationReport::Matched {
            overall_confidence,
            primary_drug,
            candidates,
            ..
        } = report
        else {
            panic!("expected matched report");
        };
        assert_eq!(candidates.len(), 3);
        assert_eq!(overall_confidence, confidence_percent(95, &weights));
        assert_eq!(primary_drug.as_deref(), Some("Drug0"));
        assert_eq!(candidates[2].confidence, confidence_percent(65, &weights));
    }

    #[test]
    fn test_fallback_report_is_generic() {
        let result = RankingResult::FrequencyFallback(vec![DrugFrequency {
            drug: "Cisplatin".into(),
            count: 4,
        }]);
        let report = build_report(&result, &FieldWeights::default());
        assert!(report.is_generic());
        let RecommendationReport::Generic { drugs } = report else {
            panic!("expected generic report");
        };
        assert_eq!(drugs[0].drug, "Cisplatin");
    }
}
