//! Turns decoded responses into what the page draws.

use serde::Serialize;

use crate::config::{NORMAL_COLOR, NORMAL_GRADIENT, SUSPICIOUS_COLOR, SUSPICIOUS_GRADIENT, SUSPICIOUS_LABEL};
use crate::models::{AnalyticsResponse, CsvSummaryResponse, PredictionResponse, WebsiteAnalysisResponse};

/// Everything `chart_helpers.js` needs to draw the Normal/Suspicious pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChartSpec {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
    pub legend_position: String,
    /// Appended to the raw slice value in tooltips.
    pub tooltip_suffix: String,
}

/// Lines for the result surface plus its background style.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub lines: Vec<String>,
    pub background: &'static str,
}

pub fn website_chart(resp: &WebsiteAnalysisResponse) -> PieChartSpec {
    PieChartSpec {
        labels: vec!["Normal".to_string(), "Suspicious".to_string()],
        values: vec![resp.normal_percent, resp.suspicious_percent],
        colors: vec![NORMAL_COLOR.to_string(), SUSPICIOUS_COLOR.to_string()],
        legend_position: "bottom".to_string(),
        tooltip_suffix: "%".to_string(),
    }
}

pub fn csv_banner(resp: &CsvSummaryResponse) -> Banner {
    Banner {
        lines: vec![
            "📄 CSV Processed Successfully".to_string(),
            format!("Total Records: {}", resp.total_records),
            format!("Normal Users: {}", resp.normal_users),
            format!("Suspicious Users: {}", resp.suspicious_users),
        ],
        background: NORMAL_GRADIENT,
    }
}

pub fn prediction_banner(resp: &PredictionResponse) -> Banner {
    let suspicious = resp.prediction == SUSPICIOUS_LABEL;
    let icon = if suspicious { "🚨" } else { "✅" };
    Banner {
        lines: vec![
            format!("{} {}", icon, resp.prediction),
            format!("Confidence: {}", resp.confidence_text()),
        ],
        background: if suspicious { SUSPICIOUS_GRADIENT } else { NORMAL_GRADIENT },
    }
}

pub fn analytics_banner(resp: &AnalyticsResponse) -> Banner {
    Banner {
        lines: vec![
            "📊 Analytics Summary".to_string(),
            format!("Total Predictions: {}", resp.total_predictions),
            format!("Normal Users: {} ({}%)", resp.normal_users, resp.normal_percent),
            format!("Suspicious Users: {} ({}%)", resp.suspicious_users, resp.suspicious_percent),
        ],
        background: NORMAL_GRADIENT,
    }
}
