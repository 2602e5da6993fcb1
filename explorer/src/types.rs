//! Explorer-specific data types
//!
//! Canonical records produced from raw service payloads, plus the query and
//! history types the coordinator tracks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use shared::{CorpusStats, QueryKind, SentenceCorpusStats, SmoothingVariant};

/// A user question, stamped with its sequence number at dispatch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    kind: QueryKind,
    raw_input: String,
    sequence: u64,
}

impl Query {
    pub fn new(kind: QueryKind, raw_input: impl Into<String>, sequence: u64) -> Self {
        Self {
            kind,
            raw_input: raw_input.into(),
            sequence,
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// One next-word suggestion under a single smoothing variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub word: String,
    pub probability: f64,
    pub variant: SmoothingVariant,
}

/// Normalized autocomplete result, one ranked list per smoothing variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub no_smoothing: Vec<SuggestionItem>,
    pub laplace: Vec<SuggestionItem>,
    pub kneser_ney: Vec<SuggestionItem>,
    /// Variants the payload did not carry at all
    pub missing: Vec<SmoothingVariant>,
}

impl Suggestions {
    pub fn variant(&self, variant: SmoothingVariant) -> &[SuggestionItem] {
        match variant {
            SmoothingVariant::NoSmoothing => &self.no_smoothing,
            SmoothingVariant::Laplace => &self.laplace,
            SmoothingVariant::KneserNey => &self.kneser_ney,
        }
    }

    pub(crate) fn variant_mut(&mut self, variant: SmoothingVariant) -> &mut Vec<SuggestionItem> {
        match variant {
            SmoothingVariant::NoSmoothing => &mut self.no_smoothing,
            SmoothingVariant::Laplace => &mut self.laplace,
            SmoothingVariant::KneserNey => &mut self.kneser_ney,
        }
    }

    pub fn missing_variants(&self) -> &[SmoothingVariant] {
        &self.missing
    }

    /// True when at least one variant was absent from the payload
    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Distinct words suggested under any variant
    pub fn distinct_words(&self) -> BTreeSet<&str> {
        SmoothingVariant::ALL
            .iter()
            .flat_map(|variant| self.variant(*variant).iter().map(|item| item.word.as_str()))
            .collect()
    }
}

/// One spelling correction with its probability under both estimators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionCandidate {
    pub word: String,
    pub frequency: u64,
    pub unsmoothed_prob: f64,
    pub smoothed_prob: f64,
}

/// Normalized autocorrect result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corrections {
    pub original: String,
    pub stats: CorpusStats,
    pub candidates: Vec<CorrectionCandidate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnigramCount {
    pub word: String,
    pub frequency: u64,
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigramCount {
    pub bigram: String,
    pub frequency: u64,
    pub probability: Option<f64>,
}

/// Normalized sentence-probability result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnalysis {
    pub sentence: String,
    pub probability: f64,
    pub unigrams: Vec<UnigramCount>,
    pub bigrams: Vec<BigramCount>,
    pub corpus_stats: Option<SentenceCorpusStats>,
}

/// Canonical record for any query kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NormalizedResult {
    Autocomplete(Suggestions),
    Autocorrect(Corrections),
    SentenceProbability(SentenceAnalysis),
}

impl NormalizedResult {
    pub fn kind(&self) -> QueryKind {
        match self {
            NormalizedResult::Autocomplete(_) => QueryKind::Autocomplete,
            NormalizedResult::Autocorrect(_) => QueryKind::Autocorrect,
            NormalizedResult::SentenceProbability(_) => QueryKind::SentenceProbability,
        }
    }

    /// Count recorded in history: distinct suggested words, corrections,
    /// or scored unigrams depending on the kind
    pub fn result_summary(&self) -> usize {
        match self {
            NormalizedResult::Autocomplete(suggestions) => suggestions.distinct_words().len(),
            NormalizedResult::Autocorrect(corrections) => corrections.candidates.len(),
            NormalizedResult::SentenceProbability(analysis) => analysis.unigrams.len(),
        }
    }

    pub fn as_suggestions(&self) -> Option<&Suggestions> {
        match self {
            NormalizedResult::Autocomplete(suggestions) => Some(suggestions),
            _ => None,
        }
    }

    pub fn as_corrections(&self) -> Option<&Corrections> {
        match self {
            NormalizedResult::Autocorrect(corrections) => Some(corrections),
            _ => None,
        }
    }

    pub fn as_sentence(&self) -> Option<&SentenceAnalysis> {
        match self {
            NormalizedResult::SentenceProbability(analysis) => Some(analysis),
            _ => None,
        }
    }
}

/// A completed, successful query and the size of its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: Query,
    pub result_summary: usize,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(query: Query, result_summary: usize) -> Self {
        Self {
            query,
            result_summary,
            recorded_at: Utc::now(),
        }
    }
}
