//! Shared types for the language-model explorer
//!
//! Contains the wire protocol spoken by the external scoring service,
//! identifiers used across crates, and the common tracing setup.

pub mod types;
pub mod errors;
pub mod messages;
pub mod logging;

pub use types::*;
pub use errors::*;

// Re-export the scoring service protocol
pub use messages::{
    // Request bodies
    ServiceRequest, AutocompleteRequest, AutocorrectRequest, SentenceRequest,

    // Response bodies
    ServiceResponse, AutocompleteResponse, AutocorrectResponse, SentenceProbabilityResponse,
    RankedWord, RawCorrection, CorpusStats, UnigramEntry, BigramEntry, SentenceCorpusStats,

    // Failure body
    ErrorBody,
};
