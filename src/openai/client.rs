// OpenAI chat completions client
// Author: kelexine (https://github.com/kelexine)

use crate::config::VisionConfig;
use crate::error::{GatewayError, Result};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Client for an OpenAI-compatible chat completions API.
///
/// Built once at startup and shared read-only by every request handler;
/// `reqwest::Client` pools connections internally, so no locking is needed.
pub struct OpenAiClient {
    http_client: Client,
    api_base_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a client with an explicit API key.
    pub fn new(config: &VisionConfig, api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(GatewayError::Config("API key is empty".to_string()));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create a client with the key read from the environment variable named
    /// by `config.api_key_env`.
    pub fn from_env(config: &VisionConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            GatewayError::Config(format!("{} is not set", config.api_key_env))
        })?;
        Self::new(config, api_key)
    }

    /// Get the API base URL
    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Call `POST /chat/completions` once. No retries.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.api_base_url);
        debug!("Calling chat completions API for model: {}", request.model);

        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                crate::metrics::record_vision_call(&request.model, 0, start.elapsed().as_secs_f64());
                GatewayError::GenerationFailed(format!("HTTP error: {}", e))
            })?;

        let status = response.status();
        crate::metrics::record_vision_call(
            &request.model,
            status.as_u16(),
            start.elapsed().as_secs_f64(),
        );

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            let message = sanitize(&message);
            error!("Vision API error: HTTP {} - {}", status, message);
            return Err(GatewayError::GenerationFailed(format!(
                "HTTP {}: {}",
                status, message
            )));
        }

        let response_text = response.text().await.map_err(|e| {
            GatewayError::GenerationFailed(format!("Failed to read response body: {}", e))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse vision API response: {}", e);
            GatewayError::GenerationFailed(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            #[serde(rename = "type")]
            error_type: Option<String>,
        }

        let error = serde_json::from_str::<ErrorResponse>(response_text).ok()?.error?;
        error.message.or(error.error_type)
    }
}
