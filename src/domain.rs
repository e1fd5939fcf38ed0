//! Homework review statuses and the messages rendered from them

use std::collections::HashMap;

use compact_str::CompactString;
use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

/// Verdict text per review status; fixed for the process lifetime.
static HOMEWORK_VERDICTS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
        ("reviewing", "Работа взята на проверку ревьюером."),
        ("rejected", "Работа проверена: у ревьюера есть замечания."),
    ])
});

/// Look up the verdict text for a review status code.
pub fn verdict_for(status: &str) -> Option<&'static str> {
    HOMEWORK_VERDICTS.get(status).copied()
}

/// Errors when extracting a status message from a homework entry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusParseError {
    /// Entry has no `homework_name` key
    #[error("homework entry has no \"homework_name\" key")]
    MissingHomeworkName,

    /// Entry status is absent from the verdict mapping
    #[error("unknown homework status: {status:?}")]
    UnknownStatus { status: CompactString },
}

/// Render the notification text for one homework entry.
///
/// Terminal verdicts (`approved`, `rejected`) get the extended message with
/// the reviewer comment embedded; everything else gets the one-line
/// status-change message. Pure: sending is the caller's concern.
pub fn parse_status(entry: &Value) -> Result<String, StatusParseError> {
    let homework_name = entry
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(StatusParseError::MissingHomeworkName)?;
    debug!(homework = homework_name, "extracting review status");

    let status = entry.get("status").and_then(Value::as_str).unwrap_or("");
    let verdict = verdict_for(status).ok_or_else(|| StatusParseError::UnknownStatus {
        status: status.into(),
    })?;
    info!(homework = homework_name, verdict, "review status changed");

    let comment = entry
        .get("reviewer_comment")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let message = match status {
        "approved" => format!(
            "Молодец! Очень горжусь тобой! Ты успешно справился с этим проектом.\n\
             Ревьюер оставил тебе комментарий: \"{comment}\"\n\
             Впереди ждут новые трудности и новые победы."
        ),
        "rejected" => format!(
            "Не буду томить ожиданием. Ревьюер вернул проект на доработку с \
             комментарием \"{comment}\"\nЭто не повод расстраиваться и всё бросить, \
             прежде всего это новый опыт, ведь дальше будет сложнее. Отдохни, потом \
             приступи к работе над ошибками. Удачи!"
        ),
        _ => format!("Изменился статус проверки работы \"{homework_name}\". {verdict}"),
    };

    Ok(message)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_verdict_mapping() {
        assert!(verdict_for("approved").is_some());
        assert!(verdict_for("reviewing").is_some());
        assert!(verdict_for("rejected").is_some());
        assert!(verdict_for("resubmitted").is_none());
    }

    #[test]
    fn test_approved_renders_extended_message() {
        let entry = json!({
            "homework_name": "X",
            "status": "approved",
            "reviewer_comment": "Great"
        });

        let message = parse_status(&entry).unwrap();
        assert!(message.contains("Молодец"));
        assert!(message.contains("\"Great\""));
    }

    #[test]
    fn test_rejected_renders_extended_message() {
        let entry = json!({
            "homework_name": "X",
            "status": "rejected",
            "reviewer_comment": "Fix the tests"
        });

        let message = parse_status(&entry).unwrap();
        assert!(message.contains("на доработку"));
        assert!(message.contains("\"Fix the tests\""));
    }

    #[test]
    fn test_reviewing_renders_generic_message() {
        let entry = json!({
            "homework_name": "Y",
            "status": "reviewing"
        });

        let message = parse_status(&entry).unwrap();
        assert_eq!(
            message,
            "Изменился статус проверки работы \"Y\". Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn test_missing_comment_embeds_empty_string() {
        let entry = json!({
            "homework_name": "X",
            "status": "approved"
        });

        let message = parse_status(&entry).unwrap();
        assert!(message.contains("комментарий: \"\""));
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let entry = json!({
            "homework_name": "X",
            "status": "resubmitted"
        });

        let err = parse_status(&entry).unwrap_err();
        assert_eq!(
            err,
            StatusParseError::UnknownStatus {
                status: "resubmitted".into()
            }
        );
        assert!(err.to_string().contains("resubmitted"));
    }

    #[test]
    fn test_missing_status_is_unknown() {
        let entry = json!({ "homework_name": "X" });
        let err = parse_status(&entry).unwrap_err();
        assert!(matches!(err, StatusParseError::UnknownStatus { .. }));
    }

    #[test]
    fn test_missing_homework_name_is_an_error() {
        let entry = json!({ "status": "approved" });
        assert_eq!(
            parse_status(&entry).unwrap_err(),
            StatusParseError::MissingHomeworkName
        );
    }
}
