//! HTTP implementation of the scoring service client

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use shared::{
    AutocompleteResponse, AutocorrectResponse, ErrorBody, QueryKind, SentenceProbabilityResponse, ServiceRequest,
};
use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};
use crate::traits::ScoringService;

/// Real scoring service client posting JSON bodies with reqwest
#[derive(Clone)]
pub struct RealScoringService {
    client: reqwest::Client,
    config: ExplorerConfig,
}

impl RealScoringService {
    /// Create a client bound to the configured service URL
    pub fn new(config: &ExplorerConfig) -> ExplorerResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ExplorerError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// POST the request body for `kind` and decode the success payload
    async fn post<T: DeserializeOwned>(&self, kind: QueryKind, input: &str) -> ExplorerResult<T> {
        let url = self.config.endpoint_url(kind.endpoint());
        let body = ServiceRequest::new(kind, input);

        debug!("POST {} ({} chars)", url, input.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text).ok().and_then(|b| b.error);
            warn!("{} answered {}: {:?}", kind, status, message);
            return Err(ExplorerError::ServiceStatus {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<T>(&text).map_err(|e| {
            warn!("{} returned an undecodable body: {}", kind, e);
            ExplorerError::malformed(format!("{kind}: {e}"))
        })
    }

    fn map_send_error(&self, error: reqwest::Error) -> ExplorerError {
        if error.is_timeout() {
            ExplorerError::Timeout {
                after_ms: self.config.request_timeout.as_millis() as u64,
            }
        } else {
            ExplorerError::transport(error.to_string())
        }
    }
}

#[async_trait]
impl ScoringService for RealScoringService {
    async fn autocomplete(&self, text: &str) -> ExplorerResult<AutocompleteResponse> {
        self.post(QueryKind::Autocomplete, text).await
    }

    async fn autocorrect(&self, word: &str) -> ExplorerResult<AutocorrectResponse> {
        self.post(QueryKind::Autocorrect, word).await
    }

    async fn sentence_probability(&self, sentence: &str) -> ExplorerResult<SentenceProbabilityResponse> {
        self.post(QueryKind::SentenceProbability, sentence).await
    }
}
