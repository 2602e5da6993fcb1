//! Explorer trait definitions for dependency injection

use async_trait::async_trait;

use shared::{AutocompleteResponse, AutocorrectResponse, QueryKind, SentenceProbabilityResponse, ServiceResponse};
use crate::error::ExplorerResult;

/// Remote language-model scoring service
#[mockall::automock]
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Next-word suggestions for the text typed so far
    async fn autocomplete(&self, text: &str) -> ExplorerResult<AutocompleteResponse>;

    /// Ranked spelling corrections for a single word
    async fn autocorrect(&self, word: &str) -> ExplorerResult<AutocorrectResponse>;

    /// Probability and n-gram breakdown of a whole sentence
    async fn sentence_probability(&self, sentence: &str) -> ExplorerResult<SentenceProbabilityResponse>;
}

/// Route `input` to the endpoint answering `kind`
pub async fn call_service<S>(service: &S, kind: QueryKind, input: &str) -> ExplorerResult<ServiceResponse>
where
    S: ScoringService + ?Sized,
{
    match kind {
        QueryKind::Autocomplete => service.autocomplete(input).await.map(ServiceResponse::Autocomplete),
        QueryKind::Autocorrect => service.autocorrect(input).await.map(ServiceResponse::Autocorrect),
        QueryKind::SentenceProbability => service
            .sentence_probability(input)
            .await
            .map(ServiceResponse::SentenceProbability),
    }
}
