//! Field weights for match scoring.

use oncorec_common::{OncorecError, Result};
use serde::{Deserialize, Serialize};

/// Per-field match weights.
///
/// A record scores the full field weight when any supplied value for that
/// field matches (at most once per field); the clinical component grows
/// per matched distinct token up to its own cap. The maximum achievable
/// score is derived, never hardcoded elsewhere, so the confidence scale
/// stays in sync if weights change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldWeights {
    /// Gene symbol match (multi-valued, OR semantics)
    #[serde(default = "default_gene")]
    pub gene: u32,
    /// Mutation match (multi-valued, OR semantics)
    #[serde(default = "default_mutation")]
    pub mutation: u32,
    /// Cancer type match
    #[serde(default = "default_cancer")]
    pub cancer: u32,
    /// Stage match
    #[serde(default = "default_stage")]
    pub stage: u32,
    /// Points per distinct clinical token found in the record
    #[serde(default = "default_clinical_per_token")]
    pub clinical_per_token: u32,
    /// Upper bound on the clinical contribution
    #[serde(default = "default_clinical_cap")]
    pub clinical_cap: u32,
}

fn default_gene() -> u32 { 30 }
fn default_mutation() -> u32 { 35 }
fn default_cancer() -> u32 { 20 }
fn default_stage() -> u32 { 10 }
fn default_clinical_per_token() -> u32 { 3 }
fn default_clinical_cap() -> u32 { 10 }

impl Default for FieldWeights {
    /// The expert prior weights: mutation evidence weighs most, then
    /// gene, cancer type, stage, and a small clinical-overlap bonus.
    fn default() -> Self {
        Self {
            gene: default_gene(),
            mutation: default_mutation(),
            cancer: default_cancer(),
            stage: default_stage(),
            clinical_per_token: default_clinical_per_token(),
            clinical_cap: default_clinical_cap(),
        }
    }
}

impl FieldWeights {
    /// Maximum achievable score: every field matched plus the clinical
    /// cap. Defaults yield 30 + 35 + 20 + 10 + 10 = 105.
    pub fn max_score(&self) -> u32 {
        self.gene + self.mutation + self.cancer + self.stage + self.clinical_cap
    }

    /// A usable weight set must be able to produce a positive score and a
    /// clinical cap reachable in whole per-token steps.
    pub fn validate(&self) -> Result<()> {
        if self.max_score() == 0 {
            return Err(OncorecError::Config(
                "field weights sum to zero; no record could ever match".to_string(),
            ));
        }
        if self.clinical_per_token == 0 && self.clinical_cap > 0 {
            return Err(OncorecError::Config(
                "clinical_cap is positive but clinical_per_token is zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from a YAML file.
    pub fn from_yaml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let weights: Self = serde_yaml::from_str(&content)
            .map_err(|e| OncorecError::Config(format!("invalid weights YAML: {e}")))?;
        weights.validate()?;
        Ok(weights)
    }

    /// Load from a JSON file.
    pub fn from_json(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let weights: Self = serde_json::from_str(&content)?;
        weights.validate()?;
        Ok(weights)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_max_score() {
        assert_eq!(FieldWeights::default().max_score(), 105);
    }

    #[test]
    fn test_default_weights_validate() {
        assert!(FieldWeights::default().validate().is_ok());
    }

    #[test]
    fn test_zero_weights_rejected() {
        let w = FieldWeights {
            gene: 0,
            mutation: 0,
            cancer: 0,
            stage: 0,
            clinical_per_token: 0,
            clinical_cap: 0,
        };
        assert!(w.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let w: FieldWeights = serde_yaml::from_str("gene: 50").unwrap();
        assert_eq!(w.gene, 50);
        assert_eq!(w.mutation, 35);
        assert_eq!(w.max_score(), 125);
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"gene": 40, "mutation": 40, "cancer": 10, "stage": 5, "clinical_per_token": 1, "clinical_cap": 5}"#).unwrap();
        let w = FieldWeights::from_json(file.path().to_str().unwrap()).unwrap();
        assert_eq!(w.max_score(), 100);
    }
}
