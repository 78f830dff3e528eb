//! The validation pipeline for inbound deliveries.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::delivery::Delivery;
use crate::error::WebhookError;
use crate::request::WebhookRequest;
use crate::verification;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const EVENT_HEADER: &str = "X-GitHub-Event";
pub const DELIVERY_HEADER: &str = "X-GitHub-Delivery";
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form field carrying the JSON payload of a form-encoded delivery.
pub const FORM_PAYLOAD_FIELD: &str = "payload";

/// Validates webhook deliveries and decodes them into [`Delivery`] values.
///
/// Without a secret, signature verification is skipped entirely. That mode
/// trusts any well-formed request and is meant for local testing only.
///
/// A validator holds no mutable state, so one instance can serve any number
/// of concurrent requests.
pub struct Validator {
    secret: Option<SecretString>,
    signature_header: String,
}

impl Validator {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.map(SecretString::new),
            signature_header: SIGNATURE_HEADER.to_string(),
        }
    }

    /// Read the signature from `header` instead of `X-Hub-Signature`,
    /// e.g. `X-Hub-Signature-256`.
    pub fn with_signature_header(mut self, header: impl Into<String>) -> Self {
        self.signature_header = header.into();
        self
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    /// Validate `request` and decode its payload.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// method, `Content-Type`, event header, delivery header, signature
    /// (when a secret is configured), then the JSON payload. The payload is
    /// only decoded once the signature has been accepted.
    pub fn handle<R>(&self, request: &R) -> Result<Delivery, WebhookError>
    where
        R: WebhookRequest + ?Sized,
    {
        if request.method() != "POST" {
            return Err(WebhookError::MethodNotAllowed);
        }

        let content_type = request
            .header_line(CONTENT_TYPE_HEADER)
            .ok_or_else(|| WebhookError::missing_header(CONTENT_TYPE_HEADER))?;
        if content_type != JSON_CONTENT_TYPE && content_type != FORM_CONTENT_TYPE {
            return Err(WebhookError::UnsupportedContentType(content_type));
        }

        let event = request
            .header_line(EVENT_HEADER)
            .filter(|event| !event.is_empty())
            .ok_or_else(|| WebhookError::missing_header(EVENT_HEADER))?;

        if !request.has_header(DELIVERY_HEADER) {
            return Err(WebhookError::missing_header(DELIVERY_HEADER));
        }

        let body = if content_type == JSON_CONTENT_TYPE {
            request.body()
        } else {
            request
                .form_field(FORM_PAYLOAD_FIELD)
                .unwrap_or_default()
                .as_bytes()
        };

        if let Some(secret) = &self.secret {
            let signature = request
                .header_line(&self.signature_header)
                .ok_or_else(|| WebhookError::missing_header(&self.signature_header))?;
            verification::verify_signature(
                secret.expose_secret().as_bytes(),
                body,
                &signature,
            )?;
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(payload)) => Ok(Delivery::new(event, payload)),
            _ => Err(WebhookError::InvalidPayload),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("signature_header", &self.signature_header)
            .finish()
    }
}
