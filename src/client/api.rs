//! HTTP client for the homework status endpoint

use compact_str::format_compact;
use reqwest::{header::AUTHORIZATION, Client, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{
    config::ApiConfig,
    error::{ClientError, Result},
};

/// Pure HTTP client for the status API
///
/// Issues one authenticated GET per poll cycle and decodes the body as
/// untyped JSON; shape validation happens downstream.
#[derive(Debug, Clone)]
pub struct StatusApi {
    client: Client,
    config: ApiConfig,
}

impl StatusApi {
    /// Create a new status API client
    pub fn new(config: ApiConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// Fetch homework statuses changed since `cursor`.
    #[instrument(skip(self), fields(from_date = cursor))]
    pub async fn fetch(&self, cursor: i64) -> Result<Value> {
        let url = format_compact!("{}?from_date={}", self.config.endpoint, cursor);
        let auth = format_compact!("OAuth {}", self.config.token);

        let response = self
            .client
            .get(url.as_str())
            .header(AUTHORIZATION, auth.as_str())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get current configuration
    #[allow(dead_code)]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Decode the response body, mapping non-200 statuses to errors
    async fn handle_response(&self, response: Response) -> Result<Value> {
        let endpoint = response.url().path().to_string();
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            debug!(bytes = body.len(), "received status response");
            serde_json::from_str(&body).map_err(|e| ClientError::json_parse(endpoint, e))
        } else {
            Err(ClientError::HttpStatus {
                status: status.as_u16(),
                endpoint,
            })
        }
    }
}
