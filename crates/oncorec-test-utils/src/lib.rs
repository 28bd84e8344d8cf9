//! oncorec-test-utils — Record and corpus builders for tests.

use oncorec_common::TreatmentRecord;
use oncorec_corpus::Corpus;

/// Fluent builder for synthetic treatment records.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    record: TreatmentRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gene(mut self, gene: &str) -> Self {
        self.record.gene = gene.to_string();
        self
    }

    pub fn mutation(mut self, mutation: &str) -> Self {
        self.record.mutation = mutation.to_string();
        self
    }

    pub fn cancer_type(mut self, cancer_type: &str) -> Self {
        self.record.cancer_type = cancer_type.to_string();
        self
    }

    pub fn stage(mut self, stage: &str) -> Self {
        self.record.stage = stage.to_string();
        self
    }

    pub fn clinical_info(mut self, clinical_info: &str) -> Self {
        self.record.clinical_info = clinical_info.to_string();
        self
    }

    pub fn drug(mut self, drug: &str) -> Self {
        self.record.recommended_drug = Some(drug.to_string());
        self
    }

    pub fn combination(mut self, drugs: &[&str]) -> Self {
        self.record.recommended_combination =
            Some(drugs.iter().map(|d| d.to_string()).collect());
        self
    }

    pub fn effectiveness(mut self, note: &str) -> Self {
        self.record.drug_effectiveness_info = Some(note.to_string());
        self
    }

    pub fn build(self) -> TreatmentRecord {
        self.record
    }
}

/// A small realistic corpus covering the common test scenarios: a strong
/// EGFR match, a combination regimen, and a record without any
/// recommendation.
pub fn sample_corpus() -> Corpus {
    Corpus::from_records(vec![
        RecordBuilder::new()
            .gene("EGFR")
            .mutation("L858R")
            .cancer_type("Lung adenocarcinoma")
            .stage("IV")
            .clinical_info("metastasis to bone, pain reported")
            .drug("Osimertinib")
            .effectiveness("High response rate in EGFR-mutant NSCLC")
            .build(),
        RecordBuilder::new()
            .gene("EGFR")
            .mutation("EGFR T790M resistant")
            .cancer_type("NSCLC")
            .stage("IV")
            .clinical_info("progression on first-line TKI")
            .drug("Osimertinib")
            .build(),
        RecordBuilder::new()
            .gene("KRAS")
            .mutation("G12C")
            .cancer_type("NSCLC")
            .stage("III")
            .clinical_info("smoker, high PD-L1 expression")
            .combination(&["Sotorasib", "Pembrolizumab"])
            .build(),
        RecordBuilder::new()
            .gene("BRAF")
            .mutation("V600E")
            .cancer_type("Melanoma")
            .stage("III")
            .clinical_info("lymph node involvement")
            .combination(&["Dabrafenib", "Trametinib"])
            .build(),
        RecordBuilder::new()
            .gene("TP53")
            .mutation("R175H")
            .cancer_type("Ovarian")
            .stage("II")
            .clinical_info("ascites present")
            .build(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let r = RecordBuilder::new()
            .gene("EGFR")
            .mutation("L858R")
            .drug("Osimertinib")
            .build();
        assert_eq!(r.gene, "EGFR");
        assert_eq!(r.recommended_drug.as_deref(), Some("Osimertinib"));
        assert!(r.recommended_combination.is_none());
    }

    #[test]
    fn test_sample_corpus_shape() {
        let corpus = sample_corpus();
        assert_eq!(corpus.len(), 5);
        assert!(corpus.iter().any(|r| !r.has_recommendation()));
    }
}
