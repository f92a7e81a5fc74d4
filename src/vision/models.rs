// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, Result};
use base64::Engine;
use bytes::Bytes;

/// Message returned when an upload's declared type is outside the allow-list.
pub const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please upload JPG, PNG, or WebP images.";

/// Supported upload formats (the allow-list)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Match a declared MIME type against the allow-list.
    ///
    /// Exact comparison only: no aliases, case folding or parameters.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// One uploaded file, fully read into memory.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub data: Bytes,
    /// Content type exactly as declared by the client.
    pub content_type: String,
    pub format: ImageFormat,
    pub file_name: Option<String>,
}

impl UploadedImage {
    /// Check a declared content type against the allow-list.
    pub fn validate_content_type(content_type: Option<&str>) -> Result<ImageFormat> {
        content_type
            .and_then(ImageFormat::from_mime_type)
            .ok_or_else(|| GatewayError::InvalidInput(INVALID_TYPE_MESSAGE.to_string()))
    }

    /// Inline `data:` URI for embedding in a prompt.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}

/// The car photo and the modification part photo from one request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub car: UploadedImage,
    pub part: UploadedImage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_allow_list() {
        assert_eq!(ImageFormat::from_mime_type("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime_type("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("image/webp"), Some(ImageFormat::WebP));
    }

    #[test]
    fn test_near_miss_types_rejected() {
        for mime in [
            "image/jpg",
            "IMAGE/JPEG",
            "Image/Png",
            "image/png; foo=bar",
            "image/webp; charset=binary",
            " image/jpeg",
        ] {
            assert!(ImageFormat::from_mime_type(mime).is_none(), "{} accepted", mime);
        }
    }

    #[test]
    fn test_rejected_types() {
        for mime in ["image/gif", "image/heic", "application/pdf", "text/plain", ""] {
            assert!(ImageFormat::from_mime_type(mime).is_none(), "{} accepted", mime);
        }
    }

    #[test]
    fn test_missing_content_type_is_invalid() {
        let err = UploadedImage::validate_content_type(None).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidInput(_)));
        assert_eq!(err.detail(), INVALID_TYPE_MESSAGE);
    }

    #[test]
    fn test_data_uri() {
        let image = UploadedImage {
            data: Bytes::from_static(b"\x89PNG"),
            content_type: "image/png".to_string(),
            format: ImageFormat::Png,
            file_name: Some("part.png".to_string()),
        };
        assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw==");
    }

    proptest! {
        #[test]
        fn prop_non_image_types_rejected(subtype in "[a-z]{1,12}") {
            let mime = format!("application/{}", subtype);
            prop_assert!(UploadedImage::validate_content_type(Some(&mime)).is_err());
        }

        #[test]
        fn prop_unlisted_image_subtypes_rejected(subtype in "[a-z]{1,12}") {
            prop_assume!(!["jpeg", "png", "webp"].contains(&subtype.as_str()));
            let mime = format!("image/{}", subtype);
            prop_assert!(ImageFormat::from_mime_type(&mime).is_none());
        }
    }
}
