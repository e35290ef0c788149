//! Thin JSON-over-HTTP client used by the registration service calls.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("HTTP request failed with status: {status}")]
    Status { status: u16, body: String },

    #[error("Failed to parse JSON response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&AppConfig {
            api_base_url: base_url.to_string(),
            ..AppConfig::default()
        })
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client: build_client(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn post_request<T: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: &T,
    ) -> Result<R> {
        let url = self.endpoint_url(endpoint);
        log::debug!("Making POST request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("POST {} failed: {}", url, e);
                ApiError::Transport(e.to_string())
            })?;

        let status = response.status();
        log::debug!("POST {} -> {}", url, status);

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response text: {}", e)))?;

        if !status.is_success() {
            log::warn!("POST {} returned {}: {}", url, status, response_text);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            log::error!("Unparseable response from {}: {}", url, response_text);
            ApiError::Decode(format!("{} - Response was: {}", e, response_text))
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &AppConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
}

// The browser owns timeouts for fetch requests
#[cfg(target_arch = "wasm32")]
fn build_client(_config: &AppConfig) -> reqwest::Client {
    reqwest::Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_strips_trailing_slash() {
        let client = HttpClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.endpoint_url("/api/voters/register"),
            "http://localhost:8080/api/voters/register"
        );
    }

    #[test]
    fn status_error_message() {
        let err = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP request failed with status: 503");
    }
}
