// Shared helpers for gateway integration tests
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use modstudio::config::AppConfig;
use modstudio::error::{GatewayError, Result};
use modstudio::server::create_router;
use modstudio::vision::{GenerationRequest, ImageGenerator};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const BOUNDARY: &str = "modstudio-test-boundary";

pub const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00car-photo";
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDRspoiler";

/// What the stub does when asked to generate.
#[derive(Debug, Clone, Copy)]
pub enum StubBehavior {
    /// Return the car bytes unchanged, like the real client does today.
    EchoCar,
    Fail,
    Internal,
    Empty,
}

pub struct StubGenerator {
    behavior: StubBehavior,
    ready: bool,
    calls: AtomicUsize,
    /// Handles to every upload buffer the stub has seen.
    retained: Mutex<Vec<Bytes>>,
}

impl StubGenerator {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            ready: true,
            calls: AtomicUsize::new(0),
            retained: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Hand over the car and part buffers seen by `generate`, leaving none behind.
    pub fn take_retained(&self) -> Vec<Bytes> {
        std::mem::take(&mut *self.retained.lock().unwrap())
    }
}

#[async_trait]
impl ImageGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Bytes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.retained
            .lock()
            .unwrap()
            .extend([request.car.data.clone(), request.part.data.clone()]);
        match self.behavior {
            StubBehavior::EchoCar => Ok(request.car.data.clone()),
            StubBehavior::Fail => Err(GatewayError::GenerationFailed(
                "HTTP 503: upstream overloaded".to_string(),
            )),
            StubBehavior::Internal => Err(GatewayError::Internal("stub exploded".to_string())),
            StubBehavior::Empty => Ok(Bytes::new()),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

pub fn router_with(generator: Arc<dyn ImageGenerator>) -> Router {
    create_router(AppConfig::default(), generator).unwrap()
}

/// One file part: (field name, declared content type, bytes).
pub type FilePart<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, content_type, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}.bin\"\r\n",
                name, name
            )
            .as_bytes(),
        );
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn generate_request(parts: &[FilePart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn valid_request() -> Request<Body> {
    generate_request(&[
        ("car_image", Some("image/jpeg"), JPEG_BYTES),
        ("part_image", Some("image/png"), PNG_BYTES),
    ])
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
