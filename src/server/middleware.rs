// HTTP middleware
// Author: kelexine (https://github.com/kelexine)

use crate::config::CorsConfig;
use crate::error::{GatewayError, Result};
use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// Build the CORS layer from configuration.
///
/// Methods and request headers are mirrored back to allowed origins, which is
/// how "allow everything" is expressed once credentials are enabled.
pub fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let wildcard = config.allowed_origins.iter().any(|o| o == "*");
    if wildcard && config.allow_credentials {
        return Err(GatewayError::Config(
            "cors: wildcard origin cannot be combined with credentials".to_string(),
        ));
    }

    let allow_origin = if wildcard {
        AllowOrigin::any()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| {
                    GatewayError::Config(format!("cors: invalid origin {:?}: {}", origin, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials))
}
