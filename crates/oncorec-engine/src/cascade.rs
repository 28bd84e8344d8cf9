//! Three-tier ranking cascade.
//!
//! Strict scored match → relaxed mutation-only match → global
//! drug-frequency fallback. Exactly one tier fires per query: the first
//! tier producing at least one result terminates the cascade. The
//! cascade trades specificity for availability — it degrades to
//! increasingly generic answers instead of returning nothing.

use oncorec_common::{OncorecError, Result};
use oncorec_corpus::Corpus;
use serde::Serialize;
use tracing::debug;

use crate::normalise::{normalise_scalar, ClinicalTokeniser, NormalisedQuery};
use crate::scorer::{containment_match, score_record, ScoredCandidate};
use crate::weights::FieldWeights;

/// Flat score awarded to relaxed mutation-only matches.
pub const RELAXED_MUTATION_SCORE: u32 = 30;

/// Number of drugs reported by the frequency fallback.
pub const FALLBACK_TOP_N: usize = 3;

/// Which tier of the cascade produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Strict,
    RelaxedMutation,
    FrequencyFallback,
}

/// A drug name with its occurrence count across the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugFrequency {
    pub drug: String,
    pub count: usize,
}

/// The outcome of one query: exactly one variant per invocation.
#[derive(Debug, Clone, Serialize)]
pub enum RankingResult<'a> {
    /// Records with a positive weighted score, descending (stable ties).
    StrictMatches(Vec<ScoredCandidate<'a>>),
    /// Mutation-containment matches at a flat score, corpus order.
    RelaxedMutationMatches(Vec<ScoredCandidate<'a>>),
    /// Most frequent recommended drugs corpus-wide, at most
    /// [`FALLBACK_TOP_N`] entries. May be empty when no record carries
    /// any drug data.
    FrequencyFallback(Vec<DrugFrequency>),
}

impl RankingResult<'_> {
    pub fn tier(&self) -> MatchTier {
        match self {
            RankingResult::StrictMatches(_) => MatchTier::Strict,
            RankingResult::RelaxedMutationMatches(_) => MatchTier::RelaxedMutation,
            RankingResult::FrequencyFallback(_) => MatchTier::FrequencyFallback,
        }
    }
}

/// Run the cascade for one normalised query.
///
/// Errors with [`OncorecError::EmptyCorpus`] before entering any tier if
/// the corpus holds zero records; that signal is distinct from "no match
/// found", which still yields a `FrequencyFallback`.
pub fn rank<'a>(
    corpus: &'a Corpus,
    query: &NormalisedQuery,
    weights: &FieldWeights,
    tokeniser: &ClinicalTokeniser,
) -> Result<RankingResult<'a>> {
    if corpus.is_empty() {
        return Err(OncorecError::EmptyCorpus);
    }

    // Tier 1: strict weighted scoring.
    let strict = strict_tier(corpus, query, weights, tokeniser);
    if !strict.is_empty() {
        debug!("Strict tier matched {} records", strict.len());
        return Ok(RankingResult::StrictMatches(strict));
    }

    // Tier 2: relaxed mutation-only containment, only when the caller
    // supplied at least one mutation value.
    if !query.mutations.is_empty() {
        let relaxed = relaxed_tier(corpus, query);
        if !relaxed.is_empty() {
            debug!("Relaxed mutation tier matched {} records", relaxed.len());
            return Ok(RankingResult::RelaxedMutationMatches(relaxed));
        }
    }

    // Tier 3: global drug-frequency fallback.
    let fallback = fallback_tier(corpus);
    debug!("Frequency fallback produced {} drugs", fallback.len());
    Ok(RankingResult::FrequencyFallback(fallback))
}

/// Score every record, keep positive scores, sort descending. The sort is
/// stable, so equal scores keep corpus order.
fn strict_tier<'a>(
    corpus: &'a Corpus,
    query: &NormalisedQuery,
    weights: &FieldWeights,
    tokeniser: &ClinicalTokeniser,
) -> Vec<ScoredCandidate<'a>> {
    let mut candidates: Vec<ScoredCandidate<'a>> = corpus
        .iter()
        .map(|record| ScoredCandidate {
            record,
            score: score_record(record, query, weights, tokeniser),
        })
        .filter(|c| c.score > 0)
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Mutation-only containment at a flat score, in corpus order.
fn relaxed_tier<'a>(corpus: &'a Corpus, query: &NormalisedQuery) -> Vec<ScoredCandidate<'a>> {
    corpus
        .iter()
        .filter(|record| {
            let record_mutation = normalise_scalar(&record.mutation);
            query
                .mutations
                .iter()
                .any(|m| containment_match(&record_mutation, m))
        })
        .map(|record| ScoredCandidate {
            record,
            score: RELAXED_MUTATION_SCORE,
        })
        .collect()
}

/// Frequency table of recommended drugs across the whole corpus,
/// descending by count with first-encountered order on ties, truncated to
/// [`FALLBACK_TOP_N`]. Records without drug data are skipped.
fn fallback_tier(corpus: &Corpus) -> Vec<DrugFrequency> {
    let mut frequencies: Vec<DrugFrequency> = Vec::new();
    for record in corpus {
        let Some(drug) = record.fallback_drug() else {
            continue;
        };
        match frequencies.iter_mut().find(|f| f.drug == drug) {
            Some(entry) => entry.count += 1,
            None => frequencies.push(DrugFrequency {
                drug: drug.to_string(),
                count: 1,
            }),
        }
    }
    // Stable sort: ties keep first-encountered order.
    frequencies.sort_by(|a, b| b.count.cmp(&a.count));
    frequencies.truncate(FALLBACK_TOP_N);
    frequencies
}

// ── Tests ─────────────────────────────────────────────────────────────────────
