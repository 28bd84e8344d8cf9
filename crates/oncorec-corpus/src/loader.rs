//! Treatment corpus loading.
//!
//! The corpus is loaded once at session start from a JSON array of record
//! objects and is immutable afterwards. The engine receives it by
//! reference; nothing here (or downstream) mutates records.

use std::path::Path;

use anyhow::Context;
use oncorec_common::{Result, TreatmentRecord};

/// Immutable handle over the loaded treatment corpus.
/// Build once at startup; pass by reference into the engine.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<TreatmentRecord>,
}

impl Corpus {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Build directly from already-deserialized records (tests, embedding).
    pub fn from_records(records: Vec<TreatmentRecord>) -> Self {
        let corpus = Self { records };
        corpus.log_summary();
        corpus
    }

    /// Build from a JSON array of record objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<TreatmentRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Build from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read corpus file {}", path.display()))?;
        let corpus = Self::from_json_str(&content)?;
        tracing::info!("Corpus loaded from {}: {} records", path.display(), corpus.len());
        Ok(corpus)
    }

    /// Load-time validation summary. Records without any recommendation
    /// are tolerated but flagged: they never contribute to fallback
    /// statistics.
    fn log_summary(&self) {
        let without_recommendation = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.has_recommendation());
        for (idx, record) in without_recommendation {
            tracing::warn!(
                "Corpus record {} ({}/{}) carries no recommended drug or combination",
                idx,
                record.gene,
                record.mutation
            );
        }
        tracing::debug!("Corpus holds {} records", self.records.len());
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn records(&self) -> &[TreatmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TreatmentRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a TreatmentRecord;
    type IntoIter = std::slice::Iter<'a, TreatmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_json() -> &'static str {
        r#"[
            {
                "gene": "EGFR",
                "mutation": "L858R",
                "cancer_type": "Lung adenocarcinoma",
                "stage": "IV",
                "clinical_info": "metastasis to bone, pain reported",
                "recommended_drug": "Osimertinib"
            },
            {
                "gene": "KRAS",
                "mutation": "G12C",
                "cancer_type": "NSCLC",
                "stage": "III",
                "clinical_info": "",
                "recommended_combination": ["Sotorasib", "Cetuximab"]
            },
            {
                "gene": "TP53",
                "mutation": "R175H",
                "cancer_type": "Ovarian",
                "stage": "II",
                "clinical_info": "ascites present"
            }
        ]"#
    }

    #[test]
    fn test_from_json_str() {
        let corpus = Corpus::from_json_str(sample_json()).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.records()[0].gene, "EGFR");
        assert_eq!(
            corpus.records()[1].fallback_drug(),
            Some("Sotorasib"),
            "first combination entry stands in for a missing single drug"
        );
        assert!(!corpus.records()[2].has_recommendation());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();
        let corpus = Corpus::from_json_file(file.path()).unwrap();
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Corpus::from_json_file("/nonexistent/corpus.json").is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Corpus::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_empty_array_loads_as_empty_corpus() {
        let corpus = Corpus::from_json_str("[]").unwrap();
        assert!(corpus.is_empty());
    }
}
