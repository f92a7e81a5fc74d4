// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::IntoResponse;
use modstudio::error::{GatewayError, GENERATION_FAILED_DETAIL};

#[test]
fn test_error_display_messages() {
    let errors = vec![
        GatewayError::InvalidInput("Bad upload".to_string()),
        GatewayError::ClientUnavailable,
        GatewayError::GenerationFailed("HTTP 500".to_string()),
        GatewayError::Internal("boom".to_string()),
        GatewayError::Config("missing key".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_status_mapping() {
    assert_eq!(
        GatewayError::InvalidInput("x".into()).status_code(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        GatewayError::ClientUnavailable.status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        GatewayError::GenerationFailed("x".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        GatewayError::Internal("x".into()).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_invalid_input_detail_is_message() {
    let error = GatewayError::InvalidInput("Invalid file type".to_string());
    assert_eq!(error.detail(), "Invalid file type");
}

#[test]
fn test_generation_failures_share_generic_detail() {
    assert_eq!(GatewayError::ClientUnavailable.detail(), GENERATION_FAILED_DETAIL);
    let error = GatewayError::GenerationFailed("HTTP 429: Rate limit reached".to_string());
    assert_eq!(error.detail(), GENERATION_FAILED_DETAIL);
    assert!(format!("{}", error).contains("Rate limit reached"));
}

#[test]
fn test_internal_detail_exposed() {
    let error = GatewayError::Internal("stream closed".to_string());
    assert_eq!(error.detail(), "An unexpected error occurred: stream closed");
}

#[test]
fn test_config_error_is_internal() {
    let error = GatewayError::Config("origin list is empty".to_string());
    assert_eq!(error.kind(), "internal_error");
    assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.detail().starts_with("An unexpected error occurred"));
    assert!(error.detail().contains("origin list is empty"));
}

#[test]
fn test_kind_labels() {
    assert_eq!(GatewayError::InvalidInput("x".into()).kind(), "invalid_input");
    assert_eq!(GatewayError::ClientUnavailable.kind(), "client_unavailable");
    assert_eq!(GatewayError::GenerationFailed("x".into()).kind(), "generation_failed");
    assert_eq!(GatewayError::Internal("x".into()).kind(), "internal_error");
}

#[tokio::test]
async fn test_into_response_body_shape() {
    let response = GatewayError::InvalidInput("nope".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "detail": "nope" }));
}
