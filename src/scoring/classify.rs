use serde::{Deserialize, Serialize};

use super::{
    age_score, blood_pressure_score, temperature_score, ScoreResult, FEVER_THRESHOLD,
    HIGH_RISK_THRESHOLD,
};
use crate::patient::coerce::to_float;
use crate::patient::PatientRecord;

/// Scores for a single patient record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientAssessment {
    pub id: String,
    pub blood_pressure: ScoreResult,
    pub temperature: ScoreResult,
    pub age: ScoreResult,
    pub fever: bool,
}

impl PatientAssessment {
    /// Sum of the three sub-scores. Issues contribute their score of 0.
    pub fn total_risk(&self) -> u8 {
        self.blood_pressure.score + self.temperature.score + self.age.score
    }

    pub fn is_high_risk(&self) -> bool {
        self.total_risk() >= HIGH_RISK_THRESHOLD
    }

    pub fn has_issue(&self) -> bool {
        self.blood_pressure.issue || self.temperature.issue || self.age.issue
    }
}

pub fn assess(record: &PatientRecord) -> PatientAssessment {
    let blood_pressure = blood_pressure_score(record.systolic(), record.diastolic());
    let temperature = temperature_score(record.temperature());
    let age = age_score(record.age());

    // Fever is checked against the raw reading, not the temperature band.
    let fever = !temperature.issue
        && to_float(record.temperature()).is_some_and(|t| t >= FEVER_THRESHOLD);

    PatientAssessment {
        id: record.id.clone(),
        blood_pressure,
        temperature,
        age,
        fever,
    }
}

/// The three id lists submitted at the end of a run.
///
/// Lists are append-only and keep duplicate ids if the upstream data
/// repeats them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub high_risk_patients: Vec<String>,
    pub fever_patients: Vec<String>,
    pub data_quality_issues: Vec<String>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, assessment: &PatientAssessment) {
        if assessment.is_high_risk() {
            self.high_risk_patients.push(assessment.id.clone());
        }
        if assessment.fever {
            self.fever_patients.push(assessment.id.clone());
        }
        if assessment.has_issue() {
            self.data_quality_issues.push(assessment.id.clone());
        }
    }

    /// Scores every record of a page and returns the extended accumulator.
    pub fn with_page(mut self, records: &[PatientRecord]) -> Self {
        for record in records {
            let assessment = assess(record);
            if assessment.id.is_empty() {
                tracing::warn!("patient record without an id");
            }
            tracing::debug!(
                patient_id = %assessment.id,
                total_risk = assessment.total_risk(),
                fever = assessment.fever,
                issue = assessment.has_issue(),
                "assessed patient"
            );
            self.record(&assessment);
        }
        self
    }
}
