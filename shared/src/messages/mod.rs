//! Wire protocol of the external scoring service
//!
//! Messages are organised per endpoint:
//! - `autocomplete`: next-word suggestions under each smoothing variant
//! - `autocorrect`: ranked single-word spelling corrections
//! - `sentence`: whole-sentence probability with n-gram breakdown
//!
//! Response bodies are lenient about optional detail (statistics, per-entry
//! probabilities, breakdown lists) but not about the fields that make up the
//! answer itself: those fail to deserialize, or fail [`ServiceResponse::validate`].

pub mod autocomplete;
pub mod autocorrect;
pub mod sentence;

use serde::{Deserialize, Serialize};

use crate::errors::SharedError;
use crate::types::QueryKind;

pub use autocomplete::{AutocompleteRequest, AutocompleteResponse, RankedWord};
pub use autocorrect::{AutocorrectRequest, AutocorrectResponse, CorpusStats, RawCorrection};
pub use sentence::{BigramEntry, SentenceCorpusStats, SentenceProbabilityResponse, SentenceRequest, UnigramEntry};

/// Body of a non-success response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Outbound request body, one shape per endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceRequest {
    Autocomplete(AutocompleteRequest),
    Autocorrect(AutocorrectRequest),
    SentenceProbability(SentenceRequest),
}

impl ServiceRequest {
    /// Build the body the endpoint for `kind` expects
    pub fn new(kind: QueryKind, input: impl Into<String>) -> Self {
        let input = input.into();
        match kind {
            QueryKind::Autocomplete => ServiceRequest::Autocomplete(AutocompleteRequest { text: input }),
            QueryKind::Autocorrect => ServiceRequest::Autocorrect(AutocorrectRequest { word: input }),
            QueryKind::SentenceProbability => ServiceRequest::SentenceProbability(SentenceRequest { sentence: input }),
        }
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            ServiceRequest::Autocomplete(_) => QueryKind::Autocomplete,
            ServiceRequest::Autocorrect(_) => QueryKind::Autocorrect,
            ServiceRequest::SentenceProbability(_) => QueryKind::SentenceProbability,
        }
    }
}

/// Raw successful response, tagged by the endpoint that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    Autocomplete(AutocompleteResponse),
    Autocorrect(AutocorrectResponse),
    SentenceProbability(SentenceProbabilityResponse),
}

impl ServiceResponse {
    pub fn kind(&self) -> QueryKind {
        match self {
            ServiceResponse::Autocomplete(_) => QueryKind::Autocomplete,
            ServiceResponse::Autocorrect(_) => QueryKind::Autocorrect,
            ServiceResponse::SentenceProbability(_) => QueryKind::SentenceProbability,
        }
    }

    /// Reject bodies that decoded but carry no answer for their kind
    pub fn validate(&self) -> Result<(), SharedError> {
        match self {
            ServiceResponse::Autocomplete(response) if !response.has_any_variant() => {
                Err(SharedError::IncompletePayload {
                    kind: QueryKind::Autocomplete,
                    missing: "no_smoothing, laplace_smoothing or kneser_ney".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
