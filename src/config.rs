//! Application-level configuration: constants and the runtime endpoint map.

use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;

use crate::Flow;

// Endpoints
pub const DEFAULT_API_BASE: &str = "https://behavioral-fingerprinting-backend.onrender.com";
pub const ANALYZE_WEBSITE_PATH: &str = "/api/analyze-website";
pub const PREDICT_CSV_PATH: &str = "/api/predict-csv";
pub const PREDICT_PATH: &str = "/api/predict";
pub const ANALYTICS_PATH: &str = "/api/analytics";
pub const CSV_FIELD_NAME: &str = "file";
pub const API_META_NAME: &str = "fingerprint-api";

// User-facing messages
pub const MSG_WEBSITE_INVALID: &str = "⚠️ Please enter a valid website URL and user count";
pub const MSG_CSV_MISSING: &str = "⚠️ Please select a CSV file before uploading";
pub const MSG_HOUR_RANGE: &str = "⚠️ Login hour must be between 0 and 23";
pub const MSG_NON_NEGATIVE: &str = "⚠️ Numeric fields must be non-negative";
pub const MSG_WHOLE_COUNT: &str = "⚠️ Failed logins and commands must be whole numbers";
pub const MSG_BACKEND_FAILURE: &str = "❌ Backend not reachable or error occurred";

// Session features
pub const COMMAND_PLACEHOLDER: &str = "cmd";
pub const MAX_COMMANDS_COUNT: u32 = 10_000;
pub const MIN_LOGIN_HOUR: u8 = 0;
pub const MAX_LOGIN_HOUR: u8 = 23;
pub const PROTOCOLS: [&str; 3] = ["HTTPS", "SSH", "TOR"];
pub const SUSPICIOUS_LABEL: &str = "Suspicious";

/// Columns the analysis backend reads from every uploaded CSV row.
pub const REQUIRED_CSV_COLUMNS: [&str; 6] = [
    "LoginHour",
    "SessionDuration",
    "CommandsCount",
    "FailedLogins",
    "Protocol",
    "TypingSpeed",
];

// Rendering
pub const NORMAL_COLOR: &str = "#22d3ee";
pub const SUSPICIOUS_COLOR: &str = "#ec4899";
pub const NORMAL_GRADIENT: &str = "linear-gradient(90deg, #22d3ee, #06b6d4)";
pub const SUSPICIOUS_GRADIENT: &str = "linear-gradient(90deg, #ec4899, #be185d)";
pub const CHART_CANVAS_ID: &str = "chart";

// Default values for input fields
pub const DEFAULT_NUM_USERS: &str = "100";
pub const DEFAULT_LOGIN_HOUR: &str = "9";
pub const DEFAULT_SESSION_DURATION: &str = "30";
pub const DEFAULT_COMMANDS_COUNT: &str = "20";
pub const DEFAULT_FAILED_LOGINS: &str = "0";
pub const DEFAULT_TYPING_SPEED: &str = "60";

/// Base URL per flow. Every flow uses `base_url` unless it has an override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
    #[serde(default)]
    pub overrides: HashMap<Flow, String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::with_base(DEFAULT_API_BASE)
    }
}

impl EndpointConfig {
    pub fn with_base(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            overrides: HashMap::new(),
        }
    }

    /// Route a single flow to a different host.
    pub fn with_override(mut self, flow: Flow, base_url: impl Into<String>) -> Self {
        self.overrides.insert(flow, base_url.into());
        self
    }

    /// Parse the JSON carried in the page's `<meta name="fingerprint-api">` tag.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read the endpoint map from the current document, falling back to the
    /// default host when the tag is absent or unreadable.
    pub fn from_document() -> Self {
        let selector = format!("meta[name=\"{}\"]", API_META_NAME);
        let content = gloo_utils::document()
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"));

        match content {
            Some(raw) => match Self::from_json(&raw) {
                Ok(config) => {
                    debug!("Endpoint config loaded: base {}", config.base_url);
                    config
                }
                Err(e) => {
                    warn!("Ignoring malformed endpoint config: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Full URL for a flow's endpoint.
    pub fn url_for(&self, flow: Flow) -> String {
        let base = self
            .overrides
            .get(&flow)
            .unwrap_or(&self.base_url)
            .trim_end_matches('/');
        format!("{}{}", base, flow.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_routes_every_flow_to_one_host() {
        let config = EndpointConfig::default();
        assert_eq!(
            config.url_for(Flow::WebsiteAnalysis),
            "https://behavioral-fingerprinting-backend.onrender.com/api/analyze-website"
        );
        assert_eq!(
            config.url_for(Flow::CsvUpload),
            "https://behavioral-fingerprinting-backend.onrender.com/api/predict-csv"
        );
        assert_eq!(
            config.url_for(Flow::SessionPrediction),
            "https://behavioral-fingerprinting-backend.onrender.com/api/predict"
        );
    }

    #[test]
    fn override_only_affects_its_flow() {
        let config = EndpointConfig::with_base("http://api.local/")
            .with_override(Flow::CsvUpload, "http://127.0.0.1:5000");
        assert_eq!(
            config.url_for(Flow::CsvUpload),
            "http://127.0.0.1:5000/api/predict-csv"
        );
        assert_eq!(config.url_for(Flow::SessionPrediction), "http://api.local/api/predict");
    }

    #[test]
    fn parses_meta_json() {
        let config = EndpointConfig::from_json(
            r#"{"base_url": "http://a", "overrides": {"analytics": "http://b"}}"#,
        )
        .unwrap();
        assert_eq!(config.url_for(Flow::Analytics), "http://b/api/analytics");
        assert_eq!(config.url_for(Flow::WebsiteAnalysis), "http://a/api/analyze-website");

        let bare = EndpointConfig::from_json(r#"{"base_url": "http://a"}"#).unwrap();
        assert!(bare.overrides.is_empty());
    }

    #[test]
    fn rejects_malformed_meta_json() {
        assert!(EndpointConfig::from_json("not json").is_err());
        assert!(EndpointConfig::from_json(r#"{"overrides": {}}"#).is_err());
    }
}
