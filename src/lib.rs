//! vitalrisk: clinical risk triage over a paginated assessment API
//!
//! Patient vitals are fetched page by page, scored against fixed blood
//! pressure, temperature and age tables, and sorted into high-risk, fever and
//! data-quality lists that are submitted back to the API in one request.

pub mod api;
pub mod config;
pub mod error;
pub mod patient;
pub mod pipeline;
pub mod scoring;

pub use api::{AssessmentApi, HttpAssessmentClient, RetryPolicy, SubmissionReceipt};
pub use config::Config;
pub use error::{AssessError, AssessResult};
pub use patient::PatientRecord;
pub use pipeline::{fetch_all_patients, run_assessment, PatientPager};
pub use scoring::classify::{assess, Classification, PatientAssessment};
pub use scoring::ScoreResult;
