//! Validation and decoding of GitHub webhook deliveries.
//!
//! [`Validator::handle`] runs the checks a delivery must pass and returns a
//! [`Delivery`] or the first [`WebhookError`] encountered. Requests are read
//! through the [`WebhookRequest`] trait; [`IncomingRequest`] implements it
//! over buffered `http` types. For axum services, [`VerifiedDelivery`] runs
//! the validator as an extractor and answers rejected requests itself.

pub mod delivery;
pub mod error;
pub mod extract;
pub mod http_server;
pub mod request;
pub mod types;
pub mod validator;
pub mod verification;

pub use delivery::Delivery;
pub use error::WebhookError;
pub use extract::VerifiedDelivery;
pub use request::{IncomingRequest, WebhookRequest};
pub use types::ReceivedDelivery;
pub use validator::Validator;
pub use verification::HashAlgorithm;
