//! `POST /sentence_probability` messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRequest {
    pub sentence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnigramEntry {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub frequency: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BigramEntry {
    #[serde(default)]
    pub bigram: String,
    #[serde(default)]
    pub frequency: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceCorpusStats {
    #[serde(default)]
    pub total_words: u64,
    #[serde(default)]
    pub vocab_size: u64,
    #[serde(default)]
    pub total_bigrams: u64,
    #[serde(default)]
    pub vocab_bigrams: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceProbabilityResponse {
    pub sentence: String,
    pub probability: f64,
    #[serde(default)]
    pub unigrams: Vec<UnigramEntry>,
    #[serde(default)]
    pub bigrams: Vec<BigramEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_stats: Option<SentenceCorpusStats>,
}
