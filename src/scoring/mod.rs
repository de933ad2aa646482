//! Clinical risk rule tables.
//!
//! Each sub-score is a pure function of raw field values. Rows are checked
//! top to bottom and the first match wins; a value that matches no row is
//! scored 0 and flagged as an issue.

pub mod classify;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::patient::coerce::{to_float, to_integer};

/// Temperature at or above which a patient counts as febrile.
pub const FEVER_THRESHOLD: f64 = 99.6;

/// Total risk at or above which a patient counts as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub issue: bool,
}

impl ScoreResult {
    pub const fn scored(score: u8) -> Self {
        ScoreResult { score, issue: false }
    }

    pub const fn issue() -> Self {
        ScoreResult { score: 0, issue: true }
    }
}

pub fn blood_pressure_score(systolic: Option<&Value>, diastolic: Option<&Value>) -> ScoreResult {
    let (Some(sys), Some(dia)) = (to_float(systolic), to_float(diastolic)) else {
        return ScoreResult::issue();
    };

    if sys >= 140.0 || dia >= 90.0 {
        ScoreResult::scored(3)
    } else if (130.0..=139.0).contains(&sys) || (80.0..=89.0).contains(&dia) {
        ScoreResult::scored(2)
    } else if (120.0..=129.0).contains(&sys) && dia < 80.0 {
        ScoreResult::scored(1)
    } else if sys < 120.0 && dia < 80.0 {
        ScoreResult::scored(0)
    } else {
        ScoreResult::issue()
    }
}

pub fn temperature_score(temperature: Option<&Value>) -> ScoreResult {
    let Some(temp) = to_float(temperature) else {
        return ScoreResult::issue();
    };

    if temp >= 101.0 {
        ScoreResult::scored(2)
    } else if (FEVER_THRESHOLD..=100.9).contains(&temp) {
        ScoreResult::scored(1)
    } else if temp <= 99.5 {
        ScoreResult::scored(0)
    } else {
        ScoreResult::issue()
    }
}

/// Negative and zero ages are accepted as-is and score 0.
pub fn age_score(age: Option<&Value>) -> ScoreResult {
    let Some(age) = to_integer(age) else {
        return ScoreResult::issue();
    };

    if age > 65 {
        ScoreResult::scored(2)
    } else if (40..=65).contains(&age) {
        ScoreResult::scored(1)
    } else if age < 40 {
        ScoreResult::scored(0)
    } else {
        ScoreResult::issue()
    }
}
