//! Error types for webhook validation.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Reasons a request is rejected as a webhook delivery.
///
/// Each validation step fails with exactly one of these. None of the messages
/// carry the configured secret or either digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The request method was not `POST`.
    #[error("This endpoint only accepts POST requests.")]
    MethodNotAllowed,

    /// A mandatory header is absent.
    #[error("Missing HTTP \"{header}\" header.")]
    MissingHeader { header: String },

    /// `Content-Type` is neither JSON nor form-encoded.
    #[error("Unsupported content type: \"{0}\"")]
    UnsupportedContentType(String),

    /// The signature did not match the keyed hash of the body.
    #[error("Hook secret does not match.")]
    InvalidSecret,

    /// The signature names a hash this build cannot compute.
    ///
    /// This is a server capability problem, not a client fault.
    #[error("Hash algorithm \"{0}\" is not supported.")]
    UnsupportedAlgorithm(String),

    /// The body is not a JSON object.
    #[error("Payload must be a JSON object.")]
    InvalidPayload,
}

impl WebhookError {
    pub(crate) fn missing_header(header: &str) -> Self {
        Self::MissingHeader {
            header: header.to_string(),
        }
    }

    /// Name of the missing header, for [`WebhookError::MissingHeader`].
    #[must_use]
    pub fn header(&self) -> Option<&str> {
        match self {
            Self::MissingHeader { header } => Some(header),
            _ => None,
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// - Missing header, unsupported content type, invalid payload: 400
    /// - Invalid secret: 401
    /// - Method not allowed: 405
    /// - Unsupported algorithm: 500
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHeader { .. } | Self::UnsupportedContentType(_) | Self::InvalidPayload => {
                StatusCode::BAD_REQUEST
            }
            Self::InvalidSecret => StatusCode::UNAUTHORIZED,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedAlgorithm(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            WebhookError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            WebhookError::missing_header("X-GitHub-Event").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::UnsupportedContentType("text/plain".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::InvalidPayload.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::InvalidSecret.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            WebhookError::UnsupportedAlgorithm("foo".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_header_carries_name() {
        let err = WebhookError::missing_header("Content-Type");
        assert_eq!(err.header(), Some("Content-Type"));
        assert_eq!(err.to_string(), "Missing HTTP \"Content-Type\" header.");
        assert_eq!(WebhookError::InvalidSecret.header(), None);
    }

    #[test]
    fn test_unsupported_content_type_message() {
        let err = WebhookError::UnsupportedContentType("foo/bar".into());
        assert_eq!(err.to_string(), "Unsupported content type: \"foo/bar\"");
    }

    #[tokio::test]
    async fn test_response_is_plain_text_message() {
        let response = WebhookError::InvalidSecret.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Hook secret does not match.");
    }
}
