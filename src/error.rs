//! Error types for the two failure kinds a flow can hit.

use crate::config::{
    MAX_COMMANDS_COUNT, MSG_CSV_MISSING, MSG_HOUR_RANGE, MSG_NON_NEGATIVE, MSG_WEBSITE_INVALID,
    MSG_WHOLE_COUNT,
};

/// Locally detected bad input. `Display` is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", MSG_WEBSITE_INVALID)]
    InvalidWebsite,

    #[error("{}", MSG_CSV_MISSING)]
    MissingCsv,

    #[error("⚠️ CSV is missing required columns: {}", .0.join(", "))]
    MissingCsvColumns(Vec<String>),

    #[error("{}", MSG_HOUR_RANGE)]
    LoginHourOutOfRange,

    #[error("{}", MSG_NON_NEGATIVE)]
    NegativeNumeric,

    #[error("{}", MSG_WHOLE_COUNT)]
    FractionalCount,

    #[error("⚠️ Commands count cannot exceed {}", MAX_COMMANDS_COUNT)]
    TooManyCommands,
}

/// Anything that kept a dispatched request from producing a usable response.
/// The variants only feed the log; users see one generic message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("browser API failure: {0}")]
    Browser(String),
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        RemoteError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_user_copy() {
        assert_eq!(
            ValidationError::InvalidWebsite.to_string(),
            "⚠️ Please enter a valid website URL and user count"
        );
        assert_eq!(
            ValidationError::LoginHourOutOfRange.to_string(),
            "⚠️ Login hour must be between 0 and 23"
        );
        assert_eq!(
            ValidationError::NegativeNumeric.to_string(),
            "⚠️ Numeric fields must be non-negative"
        );
        assert_eq!(
            ValidationError::FractionalCount.to_string(),
            "⚠️ Failed logins and commands must be whole numbers"
        );
        assert_eq!(
            ValidationError::TooManyCommands.to_string(),
            "⚠️ Commands count cannot exceed 10000"
        );
        assert_eq!(
            ValidationError::MissingCsv.to_string(),
            "⚠️ Please select a CSV file before uploading"
        );
    }

    #[test]
    fn missing_columns_are_listed() {
        let err = ValidationError::MissingCsvColumns(vec!["Protocol".into(), "TypingSpeed".into()]);
        assert_eq!(
            err.to_string(),
            "⚠️ CSV is missing required columns: Protocol, TypingSpeed"
        );
    }
}
