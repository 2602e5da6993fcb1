//! `POST /autocorrect` messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocorrectRequest {
    pub word: String,
}

/// Size of the training corpus the correction probabilities derive from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    #[serde(default)]
    pub vocab_size: u64,
    #[serde(default)]
    pub total_words: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCorrection {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub frequency: u64,
    /// Missing when the word never occurred in training data
    #[serde(default)]
    pub unsmoothed_prob: Option<f64>,
    #[serde(default)]
    pub smoothed_prob: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocorrectResponse {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub stats: CorpusStats,
    /// Required; an empty list is a valid answer, a missing one is not
    pub corrections: Vec<RawCorrection>,
}
