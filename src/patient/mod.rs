//! Patient records as served by the assessment API.
//!
//! Vitals are kept as raw JSON values so that a malformed field only ever
//! turns into a data-quality issue, never into a failed page.

pub mod coerce;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub blood_pressure: Option<Value>,
    #[serde(default)]
    pub temperature: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
}

impl PatientRecord {
    pub fn systolic(&self) -> Option<&Value> {
        self.blood_pressure.as_ref().and_then(|bp| bp.get("systolic"))
    }

    pub fn diastolic(&self) -> Option<&Value> {
        self.blood_pressure.as_ref().and_then(|bp| bp.get("diastolic"))
    }

    pub fn temperature(&self) -> Option<&Value> {
        self.temperature.as_ref()
    }

    pub fn age(&self) -> Option<&Value> {
        self.age.as_ref()
    }
}

/// One page of `GET /patients`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPage {
    #[serde(default)]
    patients: Option<Vec<Value>>,
    #[serde(default)]
    pagination: Option<Value>,
}

impl PatientPage {
    /// Pagination metadata when present and well formed.
    pub fn page_info(&self) -> Option<PageInfo> {
        self.pagination
            .clone()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// Records on this page; an absent or null list is empty.
    ///
    /// Every row yields a record, so a malformed row is reported as a
    /// data-quality issue instead of failing the page.
    pub fn into_patients(self) -> Vec<PatientRecord> {
        self.patients
            .unwrap_or_default()
            .into_iter()
            .map(record_from_row)
            .collect()
    }
}

fn record_from_row(row: Value) -> PatientRecord {
    match row {
        Value::Object(_) => serde_json::from_value(row).unwrap_or_default(),
        other => {
            tracing::warn!(row = %other, "patient row is not an object");
            PatientRecord::default()
        }
    }
}

/// Pagination metadata, used only for progress logging.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
    pub has_next: Option<bool>,
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => String::new(),
        // keep distinct non-string ids distinct
        Some(other) => other.to_string(),
    })
}
