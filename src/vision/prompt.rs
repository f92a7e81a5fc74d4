// Prompt construction for the car modification request
// Author: kelexine (https://github.com/kelexine)

use super::models::GenerationRequest;
use crate::config::VisionConfig;
use crate::models::{ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl, MessageContent};

pub const COMPOSITE_INSTRUCTION: &str = "You are an expert automotive visualizer. \
Take the first image (the car) and realistically apply the modification shown in the second image (the part) onto the car. \
Ensure the perspective, lighting, and scale are consistent. \
Return only the final modified image of the car, preferably with a clean or transparent background.";

/// Build the single user message: instruction, then the car, then the part.
pub fn build_chat_request(config: &VisionConfig, request: &GenerationRequest) -> ChatCompletionRequest {
    let parts = vec![
        ContentPart::Text {
            text: COMPOSITE_INSTRUCTION.to_string(),
        },
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: request.car.data_uri(),
                detail: None,
            },
        },
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: request.part.data_uri(),
                detail: None,
            },
        },
    ];

    ChatCompletionRequest {
        model: config.model.clone(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        }],
        max_tokens: Some(config.max_tokens),
    }
}
