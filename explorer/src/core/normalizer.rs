//! Normalization of raw scoring-service payloads into canonical records
//!
//! Everything here is pure: no I/O and no access to session state.

use tracing::debug;

use shared::{
    AutocompleteResponse, AutocorrectResponse, RankedWord, SentenceProbabilityResponse, ServiceResponse,
    SmoothingVariant,
};
use crate::config::DEFAULT_TOP_K;
use crate::types::{
    BigramCount, CorrectionCandidate, Corrections, NormalizedResult, SentenceAnalysis, SuggestionItem, Suggestions,
    UnigramCount,
};

/// Maps the three endpoint payload shapes onto one canonical record per kind
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Suggestions kept per smoothing variant
    top_k: usize,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_top_k(DEFAULT_TOP_K)
    }

    pub fn with_top_k(top_k: usize) -> Self {
        Self { top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn normalize(&self, response: &ServiceResponse) -> NormalizedResult {
        match response {
            ServiceResponse::Autocomplete(payload) => NormalizedResult::Autocomplete(self.normalize_autocomplete(payload)),
            ServiceResponse::Autocorrect(payload) => NormalizedResult::Autocorrect(self.normalize_autocorrect(payload)),
            ServiceResponse::SentenceProbability(payload) => {
                NormalizedResult::SentenceProbability(self.normalize_sentence(payload))
            }
        }
    }

    /// Rank each variant descending by probability and keep the top K.
    ///
    /// A variant missing from the payload becomes an empty list and is noted
    /// in [`Suggestions::missing`]. Entries without a word (blank, or absent
    /// and defaulted) are not suggestions and are dropped before ranking.
    pub fn normalize_autocomplete(&self, payload: &AutocompleteResponse) -> Suggestions {
        let mut suggestions = Suggestions::default();

        for variant in SmoothingVariant::ALL {
            match payload.variant(variant) {
                Some(ranked) => {
                    *suggestions.variant_mut(variant) = self.rank_variant(ranked, variant);
                }
                None => {
                    debug!("Autocomplete payload has no {} list", variant.payload_key());
                    suggestions.missing.push(variant);
                }
            }
        }

        suggestions
    }

    fn rank_variant(&self, ranked: &[RankedWord], variant: SmoothingVariant) -> Vec<SuggestionItem> {
        let mut items: Vec<SuggestionItem> = ranked
            .iter()
            .filter(|entry| !entry.word.trim().is_empty())
            .map(|entry| SuggestionItem {
                word: entry.word.clone(),
                probability: clamp_probability(entry.prob),
                variant,
            })
            .collect();

        // Stable, so equal probabilities keep the service's order
        items.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        items.truncate(self.top_k);
        items
    }

    /// Corrections ordered descending by smoothed probability; a missing
    /// unsmoothed probability means the word was unseen and counts as zero.
    pub fn normalize_autocorrect(&self, payload: &AutocorrectResponse) -> Corrections {
        let mut candidates: Vec<CorrectionCandidate> = payload
            .corrections
            .iter()
            .map(|raw| CorrectionCandidate {
                word: raw.word.clone(),
                frequency: raw.frequency,
                unsmoothed_prob: clamp_probability(raw.unsmoothed_prob),
                smoothed_prob: clamp_probability(raw.smoothed_prob),
            })
            .collect();

        candidates.sort_by(|a, b| b.smoothed_prob.total_cmp(&a.smoothed_prob));

        Corrections {
            original: payload.original.clone(),
            stats: payload.stats,
            candidates,
        }
    }

    /// Pass-through of sentence text and probability with the n-gram
    /// breakdowns in service order; empty breakdowns stay empty lists.
    pub fn normalize_sentence(&self, payload: &SentenceProbabilityResponse) -> SentenceAnalysis {
        SentenceAnalysis {
            sentence: payload.sentence.clone(),
            probability: clamp_probability(Some(payload.probability)),
            unigrams: payload
                .unigrams
                .iter()
                .map(|entry| UnigramCount {
                    word: entry.word.clone(),
                    frequency: entry.frequency,
                    probability: entry.probability.map(|p| clamp_probability(Some(p))),
                })
                .collect(),
            bigrams: payload
                .bigrams
                .iter()
                .map(|entry| BigramCount {
                    bigram: entry.bigram.clone(),
                    frequency: entry.frequency,
                    probability: entry.probability.map(|p| clamp_probability(Some(p))),
                })
                .collect(),
            corpus_stats: payload.corpus_stats,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Missing or NaN becomes 0; everything else is clamped into [0, 1]
fn clamp_probability(value: Option<f64>) -> f64 {
    match value {
        Some(p) if p.is_nan() => 0.0,
        Some(p) => p.clamp(0.0, 1.0),
        None => 0.0,
    }
}
