//! The inbound request as seen by the validator.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::{header, HeaderMap, Method};

use crate::validator::FORM_CONTENT_TYPE;

/// What the validator needs to read from an HTTP request.
///
/// Header names are matched case-insensitively.
pub trait WebhookRequest {
    fn method(&self) -> &str;

    /// All values of a header joined with `", "`, or `None` if the header is
    /// absent.
    fn header_line(&self, name: &str) -> Option<String>;

    fn has_header(&self, name: &str) -> bool {
        self.header_line(name).is_some()
    }

    /// The raw body bytes.
    fn body(&self) -> &[u8];

    /// A field of the parsed form-encoded body.
    fn form_field(&self, name: &str) -> Option<&str>;
}

/// A buffered HTTP request.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    method: Method,
    headers: HeaderMap,
    body: Bytes,
    parsed_body: HashMap<String, String>,
}

impl IncomingRequest {
    /// Buffer a request. A form-encoded body is parsed up front.
    pub fn new(method: Method, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let is_form = headers
            .get(header::CONTENT_TYPE)
            .is_some_and(|v| v.as_bytes() == FORM_CONTENT_TYPE.as_bytes());
        let parsed_body = if is_form {
            url::form_urlencoded::parse(&body).into_owned().collect()
        } else {
            HashMap::new()
        };

        Self {
            method,
            headers,
            body,
            parsed_body,
        }
    }

    /// Replace the parsed form body.
    pub fn with_parsed_body(mut self, parsed_body: HashMap<String, String>) -> Self {
        self.parsed_body = parsed_body;
        self
    }
}

impl WebhookRequest for IncomingRequest {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn header_line(&self, name: &str) -> Option<String> {
        let mut values = self.headers.get_all(name).iter().peekable();
        values.peek()?;
        let line = values
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        Some(line)
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    fn form_field(&self, name: &str) -> Option<&str> {
        self.parsed_body.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("x-github-event", HeaderValue::from_static("ping"));
        let req = IncomingRequest::new(Method::POST, headers, "{}");

        assert!(req.has_header("X-GitHub-Event"));
        assert_eq!(req.header_line("X-GITHUB-EVENT").as_deref(), Some("ping"));
        assert!(!req.has_header("X-GitHub-Delivery"));
        assert_eq!(req.header_line("X-GitHub-Delivery"), None);
    }

    #[test]
    fn test_header_line_joins_values() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("*/*"));
        let req = IncomingRequest::new(Method::POST, headers, "");

        assert_eq!(req.header_line("Accept").as_deref(), Some("text/html, */*"));
    }

    #[test]
    fn test_form_body_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        let req = IncomingRequest::new(
            Method::POST,
            headers,
            "payload=%7B%22zen%22%3A%22hi%22%7D&other=1",
        );

        assert_eq!(req.form_field("payload"), Some(r#"{"zen":"hi"}"#));
        assert_eq!(req.form_field("other"), Some("1"));
    }

    #[test]
    fn test_json_body_is_not_form_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        let req = IncomingRequest::new(Method::POST, headers, "payload=1");

        assert_eq!(req.form_field("payload"), None);
        assert_eq!(req.body(), b"payload=1");
    }

    #[test]
    fn test_with_parsed_body_overrides_form() {
        let req = IncomingRequest::new(Method::POST, HeaderMap::new(), "")
            .with_parsed_body(HashMap::from([("payload".to_string(), "{}".to_string())]));

        assert_eq!(req.form_field("payload"), Some("{}"));
    }
}
