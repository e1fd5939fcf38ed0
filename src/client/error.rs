//! Error types for status API operations

use thiserror::Error;

/// Structured error types for fetching and validating status responses
///
/// Transport, HTTP-status, and body-decode failures are enumerated
/// explicitly rather than folded into one opaque request error; the
/// remaining variants cover response-shape validation, with the missing
/// cursor kept distinct as a partial-success signal.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed in transit
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-200 status
    #[error("unexpected HTTP status {status} from {endpoint}")]
    HttpStatus { status: u16, endpoint: String },

    /// Response body was not valid JSON
    #[error("failed to parse JSON response from {endpoint}")]
    JsonParse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// Response is not a JSON object
    #[error("API response is not a JSON object")]
    ResponseNotAnObject,

    /// Response has no `homeworks` key
    #[error("API response has no \"homeworks\" key")]
    HomeworksMissing,

    /// `homeworks` is present but not a list
    #[error("\"homeworks\" in the API response is not a list")]
    HomeworksNotAList,

    /// `current_date` is absent or not an integer
    #[error("API response carries no usable \"current_date\" cursor")]
    CursorMissing,

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Create a JSON parsing error with endpoint context
    pub fn json_parse(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonParse {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for failures of the request itself, as opposed to the shape
    /// of a successfully delivered response.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::HttpStatus { .. } | ClientError::JsonParse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
