//! Request and response payloads exchanged with the analysis backend.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/analyze-website`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebsiteAnalysisRequest {
    pub website: String,
    pub num_users: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebsiteAnalysisResponse {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub normal_percent: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub suspicious_percent: f64,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub total_users: Option<u64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A CSV file picked by the user, read fully into memory before upload.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvAttachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvSummaryResponse {
    pub total_records: u64,
    pub normal_users: u64,
    pub suspicious_users: u64,
}

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionFeatures {
    pub login_time: String,
    pub session_duration: f64,
    pub commands: Vec<String>,
    pub failed_logins: u32,
    pub protocol: String,
    pub typing_speed: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
    /// Shown exactly as the backend sent it.
    pub confidence: serde_json::Value,
}

impl PredictionResponse {
    /// Confidence as display text: strings lose their quotes, everything else
    /// is printed as JSON.
    pub fn confidence_text(&self) -> String {
        match &self.confidence {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Body of `GET /api/analytics`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsResponse {
    pub total_predictions: u64,
    pub normal_users: u64,
    pub suspicious_users: u64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub normal_percent: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub suspicious_percent: f64,
}

/// Accept `80`, `80.5` or `"80"` for numeric fields.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}
