//! Drop-in axum extractor running the validator.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRef, FromRequest, Request};
use axum::response::{IntoResponse, Response};

use crate::delivery::Delivery;
use crate::request::{IncomingRequest, WebhookRequest};
use crate::validator::{Validator, DELIVERY_HEADER};

/// A delivery that passed every validation check.
///
/// Handlers taking this extractor never see invalid requests: a rejected
/// request is answered with the status code of its [`WebhookError`] and the
/// error message as a plain-text body. Failing to read the body is answered
/// with axum's own body rejection.
///
/// [`WebhookError`]: crate::error::WebhookError
#[derive(Debug, Clone)]
pub struct VerifiedDelivery {
    pub delivery_id: String,
    pub delivery: Delivery,
}

impl<S> FromRequest<S> for VerifiedDelivery
where
    Arc<Validator>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let validator = Arc::<Validator>::from_ref(state);
        let method = req.method().clone();
        let headers = req.headers().clone();
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let request = IncomingRequest::new(method, headers, body);
        match validator.handle(&request) {
            Ok(delivery) => Ok(Self {
                delivery_id: request.header_line(DELIVERY_HEADER).unwrap_or_default(),
                delivery,
            }),
            Err(err) => {
                log::warn!(
                    "rejected webhook delivery ({}): {err}",
                    err.status_code()
                );
                Err(err.into_response())
            }
        }
    }
}
