//! Vocabulary term lists (genes, mutations, cancer types, stages).
//!
//! Each list is a newline-delimited text file loaded once at startup and
//! used by callers to assist multi-value entry: filter terms by
//! case-insensitive containment against the fragment the user is still
//! typing.

use std::path::Path;

use anyhow::Context;
use oncorec_common::Result;

/// Ordered, deduplicated list of vocabulary terms.
#[derive(Debug, Clone, Default)]
pub struct TermList {
    terms: Vec<String>,
}

impl TermList {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// Build from newline-delimited text: trim each line, drop blanks,
    /// keep first occurrence of duplicates.
    pub fn from_lines(text: &str) -> Self {
        let mut terms: Vec<String> = Vec::new();
        for line in text.lines() {
            let term = line.trim();
            if term.is_empty() {
                continue;
            }
            if !terms.iter().any(|t| t == term) {
                terms.push(term.to_string());
            }
        }
        Self { terms }
    }

    /// Build from a newline-delimited file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read term list {}", path.display()))?;
        let list = Self::from_lines(&content);
        tracing::debug!("Term list {}: {} terms", path.display(), list.len());
        Ok(list)
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    /// Terms containing `fragment`, case-insensitive. An empty fragment
    /// matches everything.
    pub fn filter_contains(&self, fragment: &str) -> Vec<&str> {
        let needle = fragment.trim().to_lowercase();
        self.terms
            .iter()
            .filter(|t| t.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// The fragment still being typed in a comma-separated multi-value entry:
/// everything after the last comma, trimmed.
pub fn last_fragment(input: &str) -> &str {
    input.rsplit(',').next().unwrap_or(input).trim()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
