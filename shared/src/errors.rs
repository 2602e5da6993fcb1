//! Shared error types for the language-model explorer

use thiserror::Error;

use crate::types::QueryKind;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Unknown query kind: {input}")]
    UnknownQueryKind { input: String },

    #[error("Unknown smoothing variant: {input}")]
    UnknownVariant { input: String },

    #[error("{kind} response is missing {missing}")]
    IncompletePayload { kind: QueryKind, missing: String },
}
