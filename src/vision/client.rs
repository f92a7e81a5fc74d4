// Vision client: one multimodal call per generation request
// Author: kelexine (https://github.com/kelexine)

use super::models::GenerationRequest;
use super::prompt::build_chat_request;
use super::ImageGenerator;
use crate::config::VisionConfig;
use crate::error::{GatewayError, Result};
use crate::models::ChatCompletionResponse;
use crate::openai::OpenAiClient;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, error, info, warn};

/// Wraps the process-wide OpenAI handle.
///
/// The handle is resolved once at startup. When it could not be built (no
/// API key, broken TLS setup) it is `None` and every call fails fast with
/// [`GatewayError::ClientUnavailable`] without touching the network.
pub struct VisionClient {
    client: Option<OpenAiClient>,
    config: VisionConfig,
}

impl VisionClient {
    /// Build the client from configuration, reading the API key from the environment.
    ///
    /// Never fails: an initialization error is logged here, once, and the
    /// client starts in the unavailable state.
    pub fn from_config(config: &VisionConfig) -> Self {
        let client = match OpenAiClient::from_env(config) {
            Ok(client) => {
                info!("OpenAI client initialized successfully");
                Some(client)
            }
            Err(e) => {
                error!("Failed to initialize OpenAI client: {}", e);
                None
            }
        };

        Self::with_client(config, client)
    }

    pub fn with_client(config: &VisionConfig, client: Option<OpenAiClient>) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Pull the generated image out of a completion.
    ///
    /// Chat completions do not return image payloads, so there is nothing to
    /// decode yet; the car photo is handed back unchanged.
    // TODO: switch to an image-output API once the provider contract (inline base64 vs hosted URL) is chosen.
    fn extract_image(response: &ChatCompletionResponse, request: &GenerationRequest) -> Bytes {
        if let Some(refusal) = response
            .choices
            .first()
            .and_then(|choice| choice.message.refusal.as_deref())
        {
            warn!("Vision model refused the request: {}", refusal);
        }

        warn!("Image extraction from the completion is not implemented, returning the original car image");
        request.car.data.clone()
    }
}

#[async_trait]
impl ImageGenerator for VisionClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Bytes> {
        let Some(client) = &self.client else {
            error!("OpenAI client is not initialized, cannot make API call");
            return Err(GatewayError::ClientUnavailable);
        };

        debug!(
            "Preparing vision request: car={} bytes ({}), part={} bytes ({})",
            request.car.data.len(),
            request.car.format.mime_type(),
            request.part.data.len(),
            request.part.format.mime_type()
        );

        let chat_request = build_chat_request(&self.config, request);

        info!("Sending request to vision model {}", self.config.model);
        let response = client.chat_completion(&chat_request).await?;

        info!(
            "Received response from vision model: id={}, total_tokens={}",
            response.id,
            response.usage.as_ref().map(|u| u.total_tokens).unwrap_or(0)
        );

        Ok(Self::extract_image(&response, request))
    }

    fn is_ready(&self) -> bool {
        self.client.is_some()
    }
}
