//! `POST /autocomplete` messages

use serde::{Deserialize, Serialize};

use crate::types::SmoothingVariant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteRequest {
    pub text: String,
}

/// One ranked next-word candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWord {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub prob: Option<f64>,
}

/// Suggestions under each smoothing scheme; any scheme may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_smoothing: Option<Vec<RankedWord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laplace_smoothing: Option<Vec<RankedWord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kneser_ney: Option<Vec<RankedWord>>,
}

impl AutocompleteResponse {
    /// Ranked list for `variant`, or `None` when the payload omitted it
    pub fn variant(&self, variant: SmoothingVariant) -> Option<&[RankedWord]> {
        match variant {
            SmoothingVariant::NoSmoothing => self.no_smoothing.as_deref(),
            SmoothingVariant::Laplace => self.laplace_smoothing.as_deref(),
            SmoothingVariant::KneserNey => self.kneser_ney.as_deref(),
        }
    }

    /// A body listing no variant at all answers nothing
    pub fn has_any_variant(&self) -> bool {
        SmoothingVariant::ALL.iter().any(|v| self.variant(*v).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_kneser_ney_is_absent() {
        let body = r#"{
            "no_smoothing": [{"word": "mat", "prob": 0.5}],
            "laplace_smoothing": [{"word": "mat", "prob": 0.1}, {"word": "rug", "prob": 0.05}]
        }"#;
        let response: AutocompleteResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.variant(SmoothingVariant::NoSmoothing).unwrap().len(), 1);
        assert_eq!(response.variant(SmoothingVariant::Laplace).unwrap().len(), 2);
        assert!(response.variant(SmoothingVariant::KneserNey).is_none());
    }

    #[test]
    fn test_null_probability_tolerated() {
        let body = r#"{"laplace_smoothing": [{"word": "mat", "prob": null}]}"#;
        let response: AutocompleteResponse = serde_json::from_str(body).unwrap();
        let laplace = response.variant(SmoothingVariant::Laplace).unwrap();
        assert_eq!(laplace[0].prob, None);
    }

    #[test]
    fn test_empty_body_has_no_variant() {
        let response: AutocompleteResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.has_any_variant());

        let response: AutocompleteResponse = serde_json::from_str(r#"{"kneser_ney": []}"#).unwrap();
        assert!(response.has_any_variant());
    }
}
