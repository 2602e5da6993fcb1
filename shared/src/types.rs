//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::SharedError;

/// Unique identifier for an interactive session
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, enough to tell sessions apart in logs
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of question the scoring service can answer.
///
/// Each kind owns an independent staleness counter and result slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QueryKind {
    Autocomplete,
    Autocorrect,
    SentenceProbability,
}

impl QueryKind {
    pub const ALL: [QueryKind; 3] = [
        QueryKind::Autocomplete,
        QueryKind::Autocorrect,
        QueryKind::SentenceProbability,
    ];

    /// Path of the service endpoint answering this kind
    pub fn endpoint(&self) -> &'static str {
        match self {
            QueryKind::Autocomplete => "/autocomplete",
            QueryKind::Autocorrect => "/autocorrect",
            QueryKind::SentenceProbability => "/sentence_probability",
        }
    }

    /// Stable slot index, used for per-kind arrays
    pub fn index(&self) -> usize {
        match self {
            QueryKind::Autocomplete => 0,
            QueryKind::Autocorrect => 1,
            QueryKind::SentenceProbability => 2,
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Autocomplete => "autocomplete",
            QueryKind::Autocorrect => "autocorrect",
            QueryKind::SentenceProbability => "sentence_probability",
        };
        f.pad(name)
    }
}

impl FromStr for QueryKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "autocomplete" | "complete" => Ok(QueryKind::Autocomplete),
            "autocorrect" | "correct" => Ok(QueryKind::Autocorrect),
            "sentence_probability" | "sentence" | "prob" => Ok(QueryKind::SentenceProbability),
            _ => Err(SharedError::UnknownQueryKind { input: s.to_string() }),
        }
    }
}

/// Probability-estimation schemes the language model reports side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SmoothingVariant {
    NoSmoothing,
    Laplace,
    KneserNey,
}

impl SmoothingVariant {
    pub const ALL: [SmoothingVariant; 3] = [
        SmoothingVariant::NoSmoothing,
        SmoothingVariant::Laplace,
        SmoothingVariant::KneserNey,
    ];

    /// Field name carrying this variant in an autocomplete payload
    pub fn payload_key(&self) -> &'static str {
        match self {
            SmoothingVariant::NoSmoothing => "no_smoothing",
            SmoothingVariant::Laplace => "laplace_smoothing",
            SmoothingVariant::KneserNey => "kneser_ney",
        }
    }
}

impl fmt::Display for SmoothingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SmoothingVariant::NoSmoothing => "No Smoothing",
            SmoothingVariant::Laplace => "Laplace",
            SmoothingVariant::KneserNey => "Kneser-Ney",
        };
        f.pad(label)
    }
}

impl FromStr for SmoothingVariant {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "no_smoothing" | "none" | "unsmoothed" => Ok(SmoothingVariant::NoSmoothing),
            "laplace" | "laplace_smoothing" | "add_one" => Ok(SmoothingVariant::Laplace),
            "kneser_ney" | "kneser-ney" | "kn" => Ok(SmoothingVariant::KneserNey),
            _ => Err(SharedError::UnknownVariant { input: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_kind_round_trips_through_display() {
        for kind in QueryKind::ALL {
            let parsed: QueryKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_query_kind_aliases() {
        assert_eq!("correct".parse::<QueryKind>().unwrap(), QueryKind::Autocorrect);
        assert_eq!("Sentence".parse::<QueryKind>().unwrap(), QueryKind::SentenceProbability);
        assert!("translate".parse::<QueryKind>().is_err());
    }

    #[test]
    fn test_endpoints_are_distinct() {
        assert_eq!(QueryKind::Autocomplete.endpoint(), "/autocomplete");
        assert_eq!(QueryKind::Autocorrect.endpoint(), "/autocorrect");
        assert_eq!(QueryKind::SentenceProbability.endpoint(), "/sentence_probability");
    }

    #[test]
    fn test_variant_payload_keys() {
        assert_eq!(SmoothingVariant::Laplace.payload_key(), "laplace_smoothing");
        assert_eq!("kn".parse::<SmoothingVariant>().unwrap(), SmoothingVariant::KneserNey);
    }

    #[test]
    fn test_session_id_short_form() {
        let id = SessionId::new();
        assert_eq!(id.short().len(), 8);
        assert!(id.to_string().replace('-', "").starts_with(&id.short()));
        assert_ne!(id, SessionId::new());
    }
}
