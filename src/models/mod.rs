// Wire models for the upstream vision provider
// Author: kelexine (https://github.com/kelexine)

pub mod openai;

pub use openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
    MessageContent,
};
