//! Configuration for the status API client

use std::time::Duration;

use compact_str::CompactString;

use super::error::{ClientError, Result};

/// Connection settings for the status endpoint
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Full URL of the homework status endpoint
    pub endpoint: CompactString,
    /// OAuth token sent in the `Authorization` header
    pub token: CompactString,
    /// Request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(endpoint: impl Into<CompactString>, token: impl Into<CompactString>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the request timeout
    #[allow(dead_code)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(ClientError::config("endpoint cannot be empty"));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ClientError::config(
                "endpoint must start with http:// or https://",
            ));
        }

        if self.token.is_empty() {
            return Err(ClientError::config("API token cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::config("timeout must be greater than zero"));
        }

        Ok(())
    }
}
