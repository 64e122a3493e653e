//! Input collection: turns raw form text into request payloads.
//!
//! Numeric fields follow the browser's `Number()` reading of an input box:
//! blank text counts as zero, anything unparseable fails the field's rule.

use crate::config::{
    COMMAND_PLACEHOLDER, MAX_COMMANDS_COUNT, MAX_LOGIN_HOUR, MIN_LOGIN_HOUR, REQUIRED_CSV_COLUMNS,
};
use crate::error::ValidationError;
use crate::models::{CsvAttachment, SessionFeatures, WebsiteAnalysisRequest};

/// Raw text of the website analysis form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebsiteForm {
    pub website: String,
    pub num_users: String,
}

/// Raw text of the session prediction form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionForm {
    pub login_hour: String,
    pub session_duration: String,
    pub failed_logins: String,
    pub typing_speed: String,
    pub protocol: String,
    pub commands_count: String,
}

/// Files currently selected in the CSV picker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvForm {
    pub files: Vec<CsvAttachment>,
}

/// Read a numeric input box. `None` means the text is not a finite number.
pub fn read_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read a numeric box that must hold a whole number within `[min, max]`.
fn read_whole_in_range(input: &str, min: f64, max: f64) -> Option<u32> {
    read_number(input)
        .filter(|v| v.fract() == 0.0 && (min..=max).contains(v))
        .map(|v| v as u32)
}

pub fn collect_website(form: &WebsiteForm) -> Result<WebsiteAnalysisRequest, ValidationError> {
    let website = form.website.trim();
    let num_users = read_number(&form.num_users)
        .filter(|n| *n > 0.0 && *n <= u32::MAX as f64)
        .map(|n| n.trunc() as u32)
        .filter(|n| *n > 0);

    match num_users {
        Some(num_users) if !website.is_empty() => Ok(WebsiteAnalysisRequest {
            website: website.to_string(),
            num_users,
        }),
        _ => Err(ValidationError::InvalidWebsite),
    }
}

pub fn collect_csv(form: &CsvForm) -> Result<CsvAttachment, ValidationError> {
    let attachment = match form.files.as_slice() {
        [only] if !only.content.is_empty() => only,
        _ => return Err(ValidationError::MissingCsv),
    };

    let missing = missing_csv_columns(&attachment.content);
    if !missing.is_empty() {
        return Err(ValidationError::MissingCsvColumns(missing));
    }
    Ok(attachment.clone())
}

/// Required backend columns absent from the header row, in canonical order.
pub fn missing_csv_columns(content: &[u8]) -> Vec<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let present: Vec<Vec<u8>> = match reader.byte_headers() {
        Ok(headers) => headers.iter().map(|h| h.to_vec()).collect(),
        Err(_) => Vec::new(),
    };

    REQUIRED_CSV_COLUMNS
        .iter()
        .filter(|col| !present.iter().any(|h| h.as_slice() == col.as_bytes()))
        .map(|col| col.to_string())
        .collect()
}

pub fn collect_session(form: &SessionForm) -> Result<SessionFeatures, ValidationError> {
    let hour = read_whole_in_range(
        &form.login_hour,
        MIN_LOGIN_HOUR as f64,
        MAX_LOGIN_HOUR as f64,
    )
    .ok_or(ValidationError::LoginHourOutOfRange)?;

    let non_negative = |text: &str| {
        read_number(text)
            .filter(|v| *v >= 0.0)
            .ok_or(ValidationError::NegativeNumeric)
    };
    let whole = |text: &str| {
        let value = non_negative(text)?;
        if value.fract() != 0.0 {
            return Err(ValidationError::FractionalCount);
        }
        Ok(value)
    };

    let session_duration = non_negative(&form.session_duration)?;
    let failed_logins = whole(&form.failed_logins)?.min(u32::MAX as f64) as u32;
    let typing_speed = non_negative(&form.typing_speed)?;
    let commands_count = whole(&form.commands_count)?;
    if commands_count > MAX_COMMANDS_COUNT as f64 {
        return Err(ValidationError::TooManyCommands);
    }

    Ok(SessionFeatures {
        login_time: format_login_time(hour),
        session_duration,
        commands: placeholder_commands(commands_count as usize),
        failed_logins,
        protocol: form.protocol.clone(),
        typing_speed,
    })
}

/// Render an hour as the `HH:00` string the backend expects.
pub fn format_login_time(hour: u32) -> String {
    format!("{:02}:00", hour)
}

pub fn placeholder_commands(count: usize) -> Vec<String> {
    vec![COMMAND_PLACEHOLDER.to_string(); count]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_form() -> SessionForm {
        SessionForm {
            login_hour: "7".into(),
            session_duration: "30".into(),
            failed_logins: "1".into(),
            typing_speed: "55.5".into(),
            protocol: "SSH".into(),
            commands_count: "3".into(),
        }
    }

    fn attachment(content: &str) -> CsvAttachment {
        CsvAttachment {
            file_name: "logs.csv".into(),
            content: content.as_bytes().to_vec(),
        }
    }

    const FULL_HEADER: &str =
        "LoginHour,SessionDuration,CommandsCount,FailedLogins,Protocol,TypingSpeed\n";

    #[test]
    fn reads_numbers_like_an_input_box() {
        assert_eq!(read_number(""), Some(0.0));
        assert_eq!(read_number("  12 "), Some(12.0));
        assert_eq!(read_number("-3.5"), Some(-3.5));
        assert_eq!(read_number("abc"), None);
        assert_eq!(read_number("inf"), None);
    }

    #[test]
    fn website_requires_text_and_positive_count() {
        let ok = collect_website(&WebsiteForm {
            website: "  https://example.com ".into(),
            num_users: "25".into(),
        })
        .unwrap();
        assert_eq!(ok.website, "https://example.com");
        assert_eq!(ok.num_users, 25);

        for (website, users) in [("", "10"), ("   ", "10"), ("a.com", "0"), ("a.com", "-4"), ("a.com", ""), ("a.com", "x"), ("a.com", "0.5")] {
            let err = collect_website(&WebsiteForm {
                website: website.into(),
                num_users: users.into(),
            })
            .unwrap_err();
            assert_eq!(err, ValidationError::InvalidWebsite, "{:?}/{:?}", website, users);
        }
    }

    #[test]
    fn login_time_is_zero_padded() {
        assert_eq!(format_login_time(7), "07:00");
        assert_eq!(format_login_time(23), "23:00");
        assert_eq!(format_login_time(0), "00:00");

        let features = collect_session(&session_form()).unwrap();
        assert_eq!(features.login_time, "07:00");
    }

    #[test]
    fn login_hour_outside_range_is_rejected() {
        for hour in ["-1", "24", "100", "7.5", "noon"] {
            let mut form = session_form();
            form.login_hour = hour.into();
            assert_eq!(
                collect_session(&form).unwrap_err(),
                ValidationError::LoginHourOutOfRange,
                "hour {:?}",
                hour
            );
        }
    }

    #[test]
    fn hour_is_checked_before_other_fields() {
        let mut form = session_form();
        form.login_hour = "30".into();
        form.typing_speed = "-1".into();
        assert_eq!(collect_session(&form).unwrap_err(), ValidationError::LoginHourOutOfRange);
    }

    #[test]
    fn negative_numeric_fields_are_rejected() {
        let setters: [fn(&mut SessionForm); 4] = [
            |f: &mut SessionForm| f.session_duration = "-1".into(),
            |f: &mut SessionForm| f.failed_logins = "-2".into(),
            |f: &mut SessionForm| f.typing_speed = "-0.5".into(),
            |f: &mut SessionForm| f.commands_count = "-3".into(),
        ];
        for set in setters {
            let mut form = session_form();
            set(&mut form);
            assert_eq!(collect_session(&form).unwrap_err(), ValidationError::NegativeNumeric);
        }
    }

    #[test]
    fn commands_expand_to_placeholders() {
        for n in [0usize, 1, 5, 40] {
            let mut form = session_form();
            form.commands_count = n.to_string();
            let features = collect_session(&form).unwrap();
            assert_eq!(features.commands.len(), n);
            assert!(features.commands.iter().all(|c| c == "cmd"));
        }
    }

    #[test]
    fn fractional_counts_are_rejected() {
        let mut form = session_form();
        form.commands_count = "2.5".into();
        assert_eq!(collect_session(&form).unwrap_err(), ValidationError::FractionalCount);

        let mut form = session_form();
        form.failed_logins = "0.5".into();
        assert_eq!(collect_session(&form).unwrap_err(), ValidationError::FractionalCount);
    }

    #[test]
    fn huge_command_counts_are_rejected_before_allocating() {
        for count in ["10001", "1e9", "4294967295", "1e300"] {
            let mut form = session_form();
            form.commands_count = count.into();
            assert_eq!(
                collect_session(&form).unwrap_err(),
                ValidationError::TooManyCommands,
                "count {:?}",
                count
            );
        }

        let mut form = session_form();
        form.commands_count = "10000".into();
        assert_eq!(collect_session(&form).unwrap().commands.len(), 10_000);
    }

    #[test]
    fn session_fields_pass_through() {
        let features = collect_session(&session_form()).unwrap();
        assert_eq!(features.session_duration, 30.0);
        assert_eq!(features.failed_logins, 1);
        assert_eq!(features.typing_speed, 55.5);
        assert_eq!(features.protocol, "SSH");
    }

    #[test]
    fn csv_requires_one_non_empty_file() {
        assert_eq!(collect_csv(&CsvForm::default()).unwrap_err(), ValidationError::MissingCsv);
        assert_eq!(
            collect_csv(&CsvForm { files: vec![attachment("")] }).unwrap_err(),
            ValidationError::MissingCsv
        );

        let form = CsvForm {
            files: vec![attachment(&format!("{}9,30,12,0,SSH,70\n", FULL_HEADER))],
        };
        assert_eq!(collect_csv(&form).unwrap().file_name, "logs.csv");
    }

    #[test]
    fn csv_header_must_name_backend_columns() {
        let form = CsvForm {
            files: vec![attachment("LoginHour,SessionDuration,CommandsCount,FailedLogins\n1,2,3,4\n")],
        };
        assert_eq!(
            collect_csv(&form).unwrap_err(),
            ValidationError::MissingCsvColumns(vec!["Protocol".into(), "TypingSpeed".into()])
        );
    }

    #[test]
    fn csv_column_order_does_not_matter() {
        let reordered = "TypingSpeed,Protocol,FailedLogins,CommandsCount,SessionDuration,LoginHour\n";
        assert!(missing_csv_columns(reordered.as_bytes()).is_empty());
        assert!(missing_csv_columns(FULL_HEADER.as_bytes()).is_empty());
    }
}
