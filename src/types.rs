use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::delivery::Delivery;

/// An accepted delivery as handed to downstream consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedDelivery {
    /// Value of the `X-GitHub-Delivery` header.
    pub delivery_id: String,
    pub event: String,
    pub received_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl ReceivedDelivery {
    pub fn new(delivery_id: String, delivery: Delivery) -> Self {
        let (event, payload) = delivery.into_parts();
        Self {
            delivery_id,
            event,
            received_at: Utc::now(),
            payload,
        }
    }
}
