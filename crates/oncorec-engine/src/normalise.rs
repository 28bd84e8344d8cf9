//! Query input normalisation.
//!
//! Canonicalises the five raw query strings before scoring: casing and
//! whitespace for scalar fields, comma-splitting for the multi-valued
//! gene/mutation fields, and punctuation-stripping tokenisation for the
//! free-text clinical notes.

use oncorec_common::PatientQuery;
use regex::Regex;

/// Lower-case and trim a scalar field. Total: empty in, empty out.
pub fn normalise_scalar(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Split a comma-separated multi-value entry into normalised parts.
/// Parts are trimmed, lower-cased, and deduplicated preserving first-seen
/// order; empty parts are dropped.
pub fn parse_list(s: &str) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for part in s.split(',') {
        let value = part.trim().to_lowercase();
        if value.is_empty() {
            continue;
        }
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// Tokeniser for free-text clinical notes.
///
/// Lower-cases, replaces every character that is not a Unicode
/// letter/digit/whitespace with a space, splits on whitespace runs, and
/// drops tokens shorter than 3 characters (articles, abbreviation noise).
pub struct ClinicalTokeniser {
    /// Matches any char that is not a letter, digit, or whitespace.
    re_punct: Regex,
}

/// Tokens shorter than this are dropped to reduce false-positive overlap.
const MIN_TOKEN_CHARS: usize = 3;

impl ClinicalTokeniser {
    pub fn new() -> Self {
        Self {
            re_punct: Regex::new(r"[^\p{L}\p{N}\s]").expect("tokeniser regex is valid"),
        }
    }

    pub fn tokenise(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = self.re_punct.replace_all(&lowered, " ");
        stripped
            .split_whitespace()
            .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    }
}

impl Default for ClinicalTokeniser {
    fn default() -> Self {
        Self::new()
    }
}

/// A patient query with every sub-field normalised and ready to score.
#[derive(Debug, Clone, Default)]
pub struct NormalisedQuery {
    pub genes: Vec<String>,
    pub mutations: Vec<String>,
    pub cancer_type: String,
    pub stage: String,
    pub clinical_tokens: Vec<String>,
}

impl NormalisedQuery {
    pub fn from_query(query: &PatientQuery, tokeniser: &ClinicalTokeniser) -> Self {
        let mut clinical_tokens = tokeniser.tokenise(&query.clinical_notes);
        // Distinct tokens only: duplicated words in the notes must not
        // inflate the clinical overlap count.
        dedup_preserving_order(&mut clinical_tokens);

        Self {
            genes: parse_list(&query.genes),
            mutations: parse_list(&query.mutations),
            cancer_type: normalise_scalar(&query.cancer_type),
            stage: normalise_scalar(&query.stage),
            clinical_tokens,
        }
    }
}

fn dedup_preserving_order(tokens: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(tokens.len());
    tokens.retain(|t| {
        if seen.contains(t) {
            false
        } else {
            seen.push(t.clone());
            true
        }
    });
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalise_scalar() {
        assert_eq!(normalise_scalar("  Lung Adenocarcinoma  "), "lung adenocarcinoma");
        assert_eq!(normalise_scalar(""), "");
        assert_eq!(normalise_scalar("   "), "");
    }

    #[test]
    fn test_parse_list_basic() {
        assert_eq!(parse_list("EGFR, KRAS,TP53"), vec!["egfr", "kras", "tp53"]);
    }

    #[test]
    fn test_parse_list_drops_empty_parts() {
        assert_eq!(parse_list("EGFR,, , KRAS,"), vec!["egfr", "kras"]);
        assert!(parse_list("").is_empty());
        assert!(parse_list(" , ,").is_empty());
    }

    #[test]
    fn test_parse_list_dedups_preserving_order() {
        assert_eq!(parse_list("KRAS, EGFR, kras"), vec!["kras", "egfr"]);
    }

    #[test]
    fn test_tokenise_strips_punctuation() {
        let t = ClinicalTokeniser::new();
        assert_eq!(
            t.tokenise("metastasis to bone, pain reported."),
            vec!["metastasis", "bone", "pain", "reported"]
        );
    }

    #[test]
    fn test_tokenise_drops_short_tokens() {
        let t = ClinicalTokeniser::new();
        // "to" and "of" are under the 3-char minimum
        assert_eq!(t.tokenise("no sign of spread"), vec!["sign", "spread"]);
        assert!(t.tokenise("a b c").is_empty());
    }

    #[test]
    fn test_tokenise_is_locale_agnostic() {
        let t = ClinicalTokeniser::new();
        // Unicode letters survive; punctuation becomes separators
        assert_eq!(
            t.tokenise("đau xương, di căn"),
            vec!["đau", "xương", "căn"]
        );
    }

    #[test]
    fn test_tokenise_empty_input() {
        let t = ClinicalTokeniser::new();
        assert!(t.tokenise("").is_empty());
        assert!(t.tokenise("  ,.;!  ").is_empty());
    }

    #[test]
    fn test_normalised_query_dedups_clinical_tokens() {
        let q = PatientQuery::new("EGFR", "L858R", "lung", "IV", "pain pain pain");
        let nq = NormalisedQuery::from_query(&q, &ClinicalTokeniser::new());
        assert_eq!(nq.clinical_tokens, vec!["pain"]);
    }
}
