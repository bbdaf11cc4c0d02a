use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SentimentConfig;
use crate::error::TitleError;
use crate::sentiment::{ScoreKind, SentimentLabel, SentimentResult, SentimentScorer};

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    label: String,
    score: f64,
}

/// Sentiment classifier served over HTTP. One call per title, no retry.
pub struct RemoteSentiment {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl RemoteSentiment {
    pub fn from_config(config: &SentimentConfig) -> Result<Self, TitleError> {
        Self::new(config.endpoint.clone(), Duration::from_millis(config.timeout_ms))
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, TitleError> {
        if endpoint.trim().is_empty() {
            return Err(TitleError::Config("sentiment endpoint is empty".to_string()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TitleError::Config(format!("failed to build sentiment client: {}", err)))?;
        Ok(Self { endpoint, client })
    }
}

impl SentimentScorer for RemoteSentiment {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn score(&self, text: &str) -> Result<SentimentResult, TitleError> {
        let url = format!("{}/classify", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(&ClassifyRequest { text })
            .send()
            .map_err(|err| TitleError::sentiment_backend(format!("request failed: {}", err)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let detail = body.trim();
            if detail.is_empty() {
                return Err(TitleError::sentiment_backend(format!("status {}", status)));
            }
            return Err(TitleError::sentiment_backend(format!("status {}: {}", status, detail)));
        }

        let body: ClassifyResponse = response
            .json()
            .map_err(|err| TitleError::sentiment_backend(format!("response parse failed: {}", err)))?;

        if !(0.0..=1.0).contains(&body.score) {
            return Err(TitleError::sentiment_backend(format!(
                "confidence out of range: {}",
                body.score
            )));
        }

        Ok(SentimentResult {
            label: SentimentLabel::from_backend(&body.label),
            score: body.score,
            kind: ScoreKind::Confidence,
        })
    }
}
