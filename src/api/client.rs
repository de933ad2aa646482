use serde::de::DeserializeOwned;

use super::retry::{RetryDecision, RetryPolicy};
use super::{AssessmentApi, SubmissionReceipt};
use crate::config::Config;
use crate::error::{AssessError, AssessResult};
use crate::patient::PatientPage;
use crate::scoring::classify::Classification;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the assessment API.
pub struct HttpAssessmentClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl HttpAssessmentClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry,
        }
    }

    pub fn from_config(config: &Config, api_key: impl Into<String>) -> Self {
        Self::new(&config.api.base_url, api_key, config.retry.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GETs `url` and decodes the JSON body, retrying transient statuses
    /// according to the retry policy. Transport and decode failures are not
    /// retried.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> AssessResult<T> {
        for attempt in 1..=self.retry.max_attempts {
            let response = self
                .http
                .get(url)
                .header(API_KEY_HEADER, &self.api_key)
                .query(query)
                .send()
                .await
                .map_err(|source| AssessError::Transport {
                    url: url.to_string(),
                    source,
                })?;

            let status = response.status();
            if status.is_success() {
                let text = response.text().await.map_err(|source| AssessError::Transport {
                    url: url.to_string(),
                    source,
                })?;
                return serde_json::from_str(&text).map_err(|source| AssessError::Decode {
                    url: url.to_string(),
                    source,
                });
            }

            match self.retry.decide(status.as_u16(), attempt) {
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(
                        url,
                        status = status.as_u16(),
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "transient API error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::Exhausted => break,
                RetryDecision::Fail => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(AssessError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                        body,
                    });
                }
            }
        }

        Err(AssessError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.retry.max_attempts,
        })
    }
}

impl AssessmentApi for HttpAssessmentClient {
    async fn fetch_page(&self, page: u32) -> AssessResult<PatientPage> {
        let url = self.endpoint("patients");
        self.get_json(&url, &[("page", page.to_string())]).await
    }

    async fn submit(&self, classification: &Classification) -> AssessResult<SubmissionReceipt> {
        let url = self.endpoint("submit-assessment");
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(classification)
            .send()
            .await
            .map_err(|source| AssessError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        if !(200..300).contains(&status) {
            return Err(AssessError::Status {
                url,
                status,
                body: text,
            });
        }

        Ok(SubmissionReceipt::from_text(status, &text))
    }
}
