//! Assessment API access
//!
//! `AssessmentApi` is the seam between the pipeline and the transport. The
//! HTTP implementation lives in `client`; tests substitute in-memory ones.

pub mod client;
pub mod retry;

pub use client::HttpAssessmentClient;
pub use retry::{RetryDecision, RetryPolicy};

use serde::Serialize;
use serde_json::Value;

use crate::error::AssessResult;
use crate::patient::PatientPage;
use crate::scoring::classify::Classification;

#[allow(async_fn_in_trait)]
pub trait AssessmentApi {
    /// Fetches one page of patients, 1-based.
    async fn fetch_page(&self, page: u32) -> AssessResult<PatientPage>;

    /// Submits the final classification. Called once per run, never retried.
    async fn submit(&self, classification: &Classification) -> AssessResult<SubmissionReceipt>;
}

/// What the API answered to a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub status: u16,
    /// JSON body, or the raw text as a JSON string when it is not JSON.
    pub body: Value,
}

impl SubmissionReceipt {
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        SubmissionReceipt { status, body }
    }
}
