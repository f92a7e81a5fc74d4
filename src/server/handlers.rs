// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::vision::{GenerationRequest, UploadedImage};
use axum::{
    body::Body,
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

pub const ROOT_MESSAGE: &str = "ModStudio.ai Backend is running";

/// Media type used when the car upload declared none.
const FALLBACK_MEDIA_TYPE: &str = "image/png";

const CAR_FIELD: &str = "car_image";
const PART_FIELD: &str = "part_image";

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Liveness probe. Independent of the vision client state.
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    let vision_check = if state.generator.is_ready() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Model: {}", state.config.vision.model),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "error".to_string(),
            message: format!(
                "Vision client not initialized (is {} set?)",
                state.config.vision.api_key_env
            ),
        }
    };
    checks.insert("vision_client".to_string(), vision_check);

    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("API base: {}", state.config.vision.api_base_url),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Prometheus scrape endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

/// Handler for POST /generate (multipart `car_image` + `part_image`)
pub async fn generate_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    info!("Received request to generate modification");

    let result = generate(&state, multipart).await;

    match &result {
        Ok(_) => metrics::record_generation("success"),
        Err(e) => {
            metrics::record_generation(e.kind());
            match e {
                GatewayError::InvalidInput(_) => warn!("Rejected generation request: {}", e),
                _ => error!("Generation request failed: {}", e),
            }
        }
    }

    result
}

async fn generate(
    state: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Response> {
    let mut multipart = multipart.map_err(|e| GatewayError::InvalidInput(e.body_text()))?;

    // The uploads are owned by this frame and dropped on every return path
    let request = read_generation_request(&mut multipart).await?;
    debug!("Image bytes read successfully");

    let generated = state.generator.generate(&request).await?;
    if generated.is_empty() {
        return Err(GatewayError::GenerationFailed(
            "vision client returned no image bytes".to_string(),
        ));
    }

    info!("Returning {} generated image bytes", generated.len());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, response_media_type(&request.car))
        .body(Body::from(generated))
        .map_err(|e| GatewayError::Internal(format!("Failed to build response: {}", e)))
}

/// Read the two required file parts. Other form fields are skipped.
async fn read_generation_request(multipart: &mut Multipart) -> Result<GenerationRequest> {
    let mut car: Option<UploadedImage> = None;
    let mut part: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        let slot = match field_name.as_str() {
            CAR_FIELD => &mut car,
            PART_FIELD => &mut part,
            _ => {
                debug!("Ignoring form field {:?}", field_name);
                continue;
            }
        };

        if slot.is_some() {
            return Err(GatewayError::InvalidInput(format!(
                "Duplicate file part: {}",
                field_name
            )));
        }

        *slot = Some(read_upload(&field_name, field).await?);
    }

    let car = car.ok_or_else(|| missing_part(CAR_FIELD))?;
    let part = part.ok_or_else(|| missing_part(PART_FIELD))?;

    Ok(GenerationRequest { car, part })
}

/// Validate the declared content type, then read the whole part into memory.
async fn read_upload(field_name: &str, field: Field<'_>) -> Result<UploadedImage> {
    let content_type = field.content_type().map(str::to_string);
    let file_name = field.file_name().map(str::to_string);

    info!(
        "{}: {:?}, content type: {:?}",
        field_name, file_name, content_type
    );

    let format = UploadedImage::validate_content_type(content_type.as_deref()).map_err(|e| {
        warn!("Invalid file type uploaded for {}: {:?}", field_name, content_type);
        e
    })?;

    let data = field.bytes().await.map_err(multipart_error)?;

    Ok(UploadedImage {
        data,
        content_type: content_type.unwrap_or_default(),
        format,
        file_name,
    })
}

fn multipart_error(e: MultipartError) -> GatewayError {
    if e.status().is_client_error() {
        GatewayError::InvalidInput(e.body_text())
    } else {
        GatewayError::Internal(e.body_text())
    }
}

fn missing_part(name: &str) -> GatewayError {
    GatewayError::InvalidInput(format!("Missing required file part: {}", name))
}

fn response_media_type(car: &UploadedImage) -> &str {
    if car.content_type.trim().is_empty() {
        FALLBACK_MEDIA_TYPE
    } else {
        &car.content_type
    }
}
