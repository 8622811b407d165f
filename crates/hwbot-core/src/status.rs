//! Review status codes and the notification text built from them.

use serde_json::Value;
use tracing::error;

use crate::error::HwError;

/// Review state of a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    /// Parse an API status code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict sent to the chat.
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Build the status-change message for one submission record.
pub fn parse_status(record: &Value) -> Result<String, HwError> {
    let homework_name = match record.get("homework_name").and_then(display_name) {
        Some(name) => name,
        None => {
            error!("submission record has no `homework_name`");
            return Err(HwError::MissingKey(
                "submission record has no `homework_name`".into(),
            ));
        }
    };

    let code = record.get("status").and_then(Value::as_str);
    let status = match code.and_then(ReviewStatus::from_code) {
        Some(s) => s,
        None => {
            let shown = record
                .get("status")
                .map(Value::to_string)
                .unwrap_or_else(|| "<absent>".into());
            error!("unexpected homework status: {shown}");
            return Err(HwError::UnexpectedStatus(format!(
                "homework \"{homework_name}\" has status {shown}"
            )));
        }
    };

    Ok(format!(
        "Изменился статус проверки работы \"{homework_name}\". {}",
        status.verdict()
    ))
}

/// Render a submission name. Empty, zero, `false`, `null` and non-scalar
/// values count as no name.
fn display_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_approved_message() {
        let record = json!({"homework_name": "hw1", "status": "approved"});
        assert_eq!(
            parse_status(&record).unwrap(),
            "Изменился статус проверки работы \"hw1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_reviewing_and_rejected_messages() {
        let reviewing = json!({"homework_name": "sprint_7", "status": "reviewing"});
        assert_eq!(
            parse_status(&reviewing).unwrap(),
            "Изменился статус проверки работы \"sprint_7\". Работа взята на проверку ревьюером."
        );

        let rejected = json!({"homework_name": "sprint_7", "status": "rejected"});
        assert_eq!(
            parse_status(&rejected).unwrap(),
            "Изменился статус проверки работы \"sprint_7\". Работа проверена: у ревьюера есть замечания."
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let record = json!({
            "id": 124,
            "homework_name": "hw2",
            "status": "rejected",
            "reviewer_comment": "see notes",
            "date_updated": "2020-02-13T16:42:47Z",
        });
        assert!(parse_status(&record).unwrap().ends_with("есть замечания."));
    }

    #[test]
    fn test_unknown_status() {
        for code in ["done", "", "APPROVED"] {
            let record = json!({"homework_name": "hw1", "status": code});
            let err = parse_status(&record).unwrap_err();
            assert!(matches!(err, HwError::UnexpectedStatus(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_status_absent_or_not_string() {
        let err = parse_status(&json!({"homework_name": "hw1"})).unwrap_err();
        assert!(matches!(err, HwError::UnexpectedStatus(_)), "got {err:?}");

        let err = parse_status(&json!({"homework_name": "hw1", "status": 3})).unwrap_err();
        assert!(matches!(err, HwError::UnexpectedStatus(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_or_empty_name() {
        let err = parse_status(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, HwError::MissingKey(_)), "got {err:?}");

        let err = parse_status(&json!({"homework_name": "", "status": "approved"})).unwrap_err();
        assert!(matches!(err, HwError::MissingKey(_)), "got {err:?}");
    }

    #[test]
    fn test_numeric_name_is_rendered() {
        let record = json!({"homework_name": 7, "status": "reviewing"});
        assert_eq!(
            parse_status(&record).unwrap(),
            "Изменился статус проверки работы \"7\". Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn test_falsy_or_compound_name_is_missing() {
        for name in [json!(0), json!(false), json!(null), json!([]), json!({"a": 1})] {
            let record = json!({"homework_name": name, "status": "approved"});
            let err = parse_status(&record).unwrap_err();
            assert!(matches!(err, HwError::MissingKey(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_record_not_a_mapping() {
        let err = parse_status(&json!("hw1")).unwrap_err();
        assert!(matches!(err, HwError::MissingKey(_)), "got {err:?}");
    }
}
