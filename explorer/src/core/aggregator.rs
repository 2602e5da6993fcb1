//! Comparison metrics derived from normalized records
//!
//! Pure business logic for turning canonical records into the numeric views
//! a chart or table needs. Divisions that would produce an invalid number are
//! reported as an explicit `Undefined` value instead.

use serde::{Deserialize, Serialize};

use shared::{QueryKind, SmoothingVariant};
use crate::types::{Corrections, HistoryEntry, Suggestions};

/// A ratio that may not be computable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ratio {
    Value(f64),
    Undefined,
}

impl Ratio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            Ratio::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Ratio::Undefined)
    }
}

/// Smoothed-versus-unsmoothed view of one correction candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateComparison {
    pub word: String,
    pub unsmoothed: f64,
    pub smoothed: f64,
    /// `smoothed - unsmoothed`
    pub delta: f64,
    /// `|smoothed - unsmoothed|`
    pub abs_delta: f64,
    /// `delta / unsmoothed`, undefined for unseen words
    pub improvement: Ratio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Estimator {
    Unsmoothed,
    Smoothed,
}

/// One point of a paired unsmoothed/smoothed series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub word: String,
    pub estimator: Estimator,
    pub value: f64,
}

/// Probability of a word under every smoothing variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRow {
    pub word: String,
    /// Indexed like [`SmoothingVariant::ALL`]; `None` when the word is not
    /// listed under that variant
    pub probabilities: [Option<f64>; 3],
}

impl VariantRow {
    pub fn probability(&self, variant: SmoothingVariant) -> Option<f64> {
        let index = SmoothingVariant::ALL.iter().position(|v| *v == variant)?;
        self.probabilities[index]
    }
}

/// One bar of the history trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub kind: QueryKind,
    pub count: usize,
}

/// Per-candidate deltas and relative improvements
pub fn compare_candidates(corrections: &Corrections) -> Vec<CandidateComparison> {
    corrections
        .candidates
        .iter()
        .map(|candidate| {
            let delta = candidate.smoothed_prob - candidate.unsmoothed_prob;
            let improvement = if candidate.unsmoothed_prob == 0.0 {
                Ratio::Undefined
            } else {
                Ratio::Value(delta / candidate.unsmoothed_prob)
            };

            CandidateComparison {
                word: candidate.word.clone(),
                unsmoothed: candidate.unsmoothed_prob,
                smoothed: candidate.smoothed_prob,
                delta,
                abs_delta: delta.abs(),
                improvement,
            }
        })
        .collect()
}

/// Each probability's share of the total; all undefined when the total is zero
pub fn distribution_shares(probabilities: &[f64]) -> Vec<Ratio> {
    let total: f64 = probabilities.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return vec![Ratio::Undefined; probabilities.len()];
    }

    probabilities.iter().map(|p| Ratio::Value(p / total)).collect()
}

/// Shares of smoothed probability across the correction candidates
pub fn correction_shares(corrections: &Corrections) -> Vec<(String, Ratio)> {
    let probabilities: Vec<f64> = corrections.candidates.iter().map(|c| c.smoothed_prob).collect();
    corrections
        .candidates
        .iter()
        .map(|c| c.word.clone())
        .zip(distribution_shares(&probabilities))
        .collect()
}

/// Shares of probability within one smoothing variant.
///
/// An empty or missing variant yields no entries: it is not applicable
/// rather than zero.
pub fn suggestion_shares(suggestions: &Suggestions, variant: SmoothingVariant) -> Vec<(String, Ratio)> {
    let items = suggestions.variant(variant);
    let probabilities: Vec<f64> = items.iter().map(|item| item.probability).collect();
    items
        .iter()
        .map(|item| item.word.clone())
        .zip(distribution_shares(&probabilities))
        .collect()
}

/// Flatten corrections into paired points for side-by-side views
pub fn side_by_side(corrections: &Corrections) -> Vec<SeriesPoint> {
    corrections
        .candidates
        .iter()
        .flat_map(|candidate| {
            [
                SeriesPoint {
                    word: candidate.word.clone(),
                    estimator: Estimator::Unsmoothed,
                    value: candidate.unsmoothed_prob,
                },
                SeriesPoint {
                    word: candidate.word.clone(),
                    estimator: Estimator::Smoothed,
                    value: candidate.smoothed_prob,
                },
            ]
        })
        .collect()
}

/// One row per suggested word with its probability under each variant,
/// in order of first appearance
pub fn cross_variant_rows(suggestions: &Suggestions) -> Vec<VariantRow> {
    let mut rows: Vec<VariantRow> = Vec::new();

    for (index, variant) in SmoothingVariant::ALL.iter().enumerate() {
        for item in suggestions.variant(*variant) {
            match rows.iter_mut().find(|row| row.word == item.word) {
                Some(row) => row.probabilities[index] = Some(item.probability),
                None => {
                    let mut probabilities = [None; 3];
                    probabilities[index] = Some(item.probability);
                    rows.push(VariantRow { word: item.word.clone(), probabilities });
                }
            }
        }
    }

    rows
}

/// Trend series over history, oldest first; counts were captured at insertion
pub fn history_trend<'a>(entries: impl IntoIterator<Item = &'a HistoryEntry>) -> Vec<TrendPoint> {
    entries
        .into_iter()
        .map(|entry| TrendPoint {
            label: entry.query.raw_input().to_string(),
            kind: entry.query.kind(),
            count: entry.result_summary,
        })
        .collect()
}
