//! Vision module: the bridge between uploaded images and the hosted model.
//!
//! This module validates upload formats against the allow-list, builds the
//! multimodal prompt (instruction text plus both images as base64 data URIs)
//! and owns the process-wide model client.
//!
//! # Submodules
//!
//! - `models`: Upload types and the image format allow-list.
//! - `prompt`: Construction of the chat completion request.
//! - `client`: The `VisionClient` that issues the upstream call.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod client;
pub mod models;
pub mod prompt;

pub use client::VisionClient;
pub use models::{GenerationRequest, ImageFormat, UploadedImage};

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Produces a composite image from a car photo and a part photo.
///
/// The HTTP layer only sees this trait, so the upstream model can be swapped
/// out (or stubbed in tests) without touching request handling.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Bytes>;

    /// Whether the generator can currently serve requests.
    fn is_ready(&self) -> bool;
}
