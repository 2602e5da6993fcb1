//! Test fixtures for explorer integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use explorer::{ExplorerError, ExplorerResult, ScoringService};
use shared::{
    AutocompleteResponse, AutocorrectResponse, BigramEntry, CorpusStats, RankedWord, RawCorrection,
    SentenceProbabilityResponse, UnigramEntry,
};

pub fn ranked(word: &str, prob: f64) -> RankedWord {
    RankedWord {
        word: word.to_string(),
        prob: Some(prob),
    }
}

/// Autocomplete payload listing `words` under every variant
pub fn autocomplete_response(words: &[(&str, f64)]) -> AutocompleteResponse {
    let list: Vec<RankedWord> = words.iter().map(|(w, p)| ranked(w, *p)).collect();
    AutocompleteResponse {
        no_smoothing: Some(list.clone()),
        laplace_smoothing: Some(list.clone()),
        kneser_ney: Some(list),
    }
}

pub fn definately_response() -> AutocorrectResponse {
    AutocorrectResponse {
        original: "definately".to_string(),
        stats: CorpusStats {
            vocab_size: 49815,
            total_words: 981716,
        },
        corrections: vec![RawCorrection {
            word: "definitely".to_string(),
            frequency: 120,
            unsmoothed_prob: Some(0.0002),
            smoothed_prob: Some(0.00019),
        }],
    }
}

pub fn sentence_response(sentence: &str) -> SentenceProbabilityResponse {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    SentenceProbabilityResponse {
        sentence: sentence.to_string(),
        probability: 0.000123,
        unigrams: words
            .iter()
            .map(|w| UnigramEntry {
                word: w.to_string(),
                frequency: 10,
                probability: None,
            })
            .collect(),
        bigrams: words
            .windows(2)
            .map(|pair| BigramEntry {
                bigram: pair.join(" "),
                frequency: 2,
                probability: None,
            })
            .collect(),
        corpus_stats: None,
    }
}

/// Service JSON body for the "the ca" autocomplete, with kneser_ney absent
pub fn partial_autocomplete_json() -> Value {
    json!({
        "no_smoothing": [
            {"word": "cat", "prob": 0.4},
            {"word": "car", "prob": 0.3}
        ],
        "laplace_smoothing": [
            {"word": "car", "prob": 0.2},
            {"word": "cat", "prob": 0.25}
        ]
    })
}

/// Canned reply for one input of a [`ScriptedService`]
#[derive(Debug, Clone)]
pub enum Reply {
    Autocomplete(AutocompleteResponse),
    Autocorrect(AutocorrectResponse),
    Sentence(SentenceProbabilityResponse),
    Status { status: u16, message: Option<String> },
}

/// Fake scoring service answering each input after its own delay
#[derive(Default)]
pub struct ScriptedService {
    scripts: HashMap<String, (Duration, Reply)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, input: &str, after: Duration, reply: Reply) -> Self {
        self.scripts.insert(input.to_string(), (after, reply));
        self
    }

    /// Shared log of inputs received, in call order; stays readable after
    /// the service has been handed over
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }

    async fn answer(&self, input: &str) -> ExplorerResult<Reply> {
        self.calls.lock().unwrap().push(input.to_string());

        let (delay, reply) = self
            .scripts
            .get(input)
            .cloned()
            .ok_or_else(|| ExplorerError::transport(format!("no script for {:?}", input)))?;
        tokio::time::sleep(delay).await;

        match reply {
            Reply::Status { status, message } => Err(ExplorerError::ServiceStatus { status, message }),
            reply => Ok(reply),
        }
    }
}

#[async_trait]
impl ScoringService for ScriptedService {
    async fn autocomplete(&self, text: &str) -> ExplorerResult<AutocompleteResponse> {
        match self.answer(text).await? {
            Reply::Autocomplete(response) => Ok(response),
            other => Err(ExplorerError::malformed(format!("scripted {:?}", other))),
        }
    }

    async fn autocorrect(&self, word: &str) -> ExplorerResult<AutocorrectResponse> {
        match self.answer(word).await? {
            Reply::Autocorrect(response) => Ok(response),
            other => Err(ExplorerError::malformed(format!("scripted {:?}", other))),
        }
    }

    async fn sentence_probability(&self, sentence: &str) -> ExplorerResult<SentenceProbabilityResponse> {
        match self.answer(sentence).await? {
            Reply::Sentence(response) => Ok(response),
            other => Err(ExplorerError::malformed(format!("scripted {:?}", other))),
        }
    }
}
