//! Test utilities and common fixtures for client modules

use serde_json::json;

use crate::{client::config::ApiConfig, notifier::TelegramNotifier};


pub const TEST_API_TOKEN: &str = "test-token";
pub const TEST_BOT_TOKEN: &str = "tg-token";
pub const TEST_CHAT_ID: &str = "424242";

/// JSON for one homework entry
pub fn homework_json(name: &str, status: &str, comment: Option<&str>) -> serde_json::Value {
    let mut entry = json!({
        "homework_name": name,
        "status": status,
    });

    if let Some(comment) = comment {
        entry["reviewer_comment"] = json!(comment);
    }

    entry
}

/// JSON for a full status response envelope
pub fn status_response(
    homeworks: Vec<serde_json::Value>,
    current_date: i64,
) -> serde_json::Value {
    json!({
        "homeworks": homeworks,
        "current_date": current_date,
    })
}

/// One wiremock server standing in for both the status API and Telegram
pub struct MockBackend {
    pub server: wiremock::MockServer,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self {
            server: wiremock::MockServer::start().await,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/homework_statuses/", self.server.uri())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.endpoint(), TEST_API_TOKEN)
    }

    pub fn notifier(&self) -> TelegramNotifier {
        TelegramNotifier::new(TEST_BOT_TOKEN, TEST_CHAT_ID)
            .unwrap()
            .with_api_base(self.server.uri())
    }

    /// Mount a 200 response for the status endpoint
    pub async fn mount_status(&self, response: &serde_json::Value) {
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/homework_statuses/"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(response))
            .mount(&self.server)
            .await;
    }

    /// Mount a successful Telegram sendMessage response
    pub async fn mount_telegram_ok(&self) {
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path(format!(
                "/bot{TEST_BOT_TOKEN}/sendMessage"
            )))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(json!({ "ok": true })),
            )
            .mount(&self.server)
            .await;
    }

    /// Bodies of all sendMessage requests received so far
    pub async fn telegram_requests(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|req| req.url.path().ends_with("/sendMessage"))
            .map(|req| String::from_utf8_lossy(&req.body).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod fixture_tests {
    use super::*;

    #[test]
    fn test_homework_json_shapes() {
        let entry = homework_json("X", "approved", Some("Great"));
        assert_eq!(entry["homework_name"], "X");
        assert_eq!(entry["reviewer_comment"], "Great");

        let entry = homework_json("Y", "reviewing", None);
        assert!(entry.get("reviewer_comment").is_none());
    }

    #[test]
    fn test_status_response_envelope() {
        let response = status_response(vec![homework_json("X", "approved", None)], 1700000000);
        assert_eq!(response["current_date"], 1700000000);
        assert!(response["homeworks"].is_array());
    }
}
