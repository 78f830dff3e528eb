use crate::extract::VerifiedDelivery;
use crate::types::ReceivedDelivery;
use crate::validator::Validator;
use axum::{extract::FromRef, extract::State, http::StatusCode, routing::any, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

#[derive(Clone)]
struct ServerState {
    validator: Arc<Validator>,
    event_tx: mpsc::UnboundedSender<ReceivedDelivery>,
}

impl FromRef<ServerState> for Arc<Validator> {
    fn from_ref(state: &ServerState) -> Self {
        state.validator.clone()
    }
}

/// Build the router serving the webhook on `path`.
///
/// Every method is routed to the validator so that non-POST requests get its
/// 405 response. Accepted deliveries are sent on `event_tx`.
pub fn router(
    path: &str,
    validator: Arc<Validator>,
    event_tx: mpsc::UnboundedSender<ReceivedDelivery>,
) -> Router {
    let state = ServerState {
        validator,
        event_tx,
    };

    Router::new()
        .route(path, any(handle_webhook))
        .with_state(state)
}

/// Spawn the Axum server on `bind` and return the bound address and a
/// channel receiver for accepted deliveries.
pub async fn start(
    bind: &str,
    path: &str,
    validator: Arc<Validator>,
) -> Result<(SocketAddr, mpsc::UnboundedReceiver<ReceivedDelivery>), String> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let app = router(path, validator, event_tx);

    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| format!("failed to bind HTTP server on {bind}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("failed to read bound address: {e}"))?;
    log::info!("HTTP server bound on {addr}");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap_or_else(|e| {
            log::error!("HTTP server error: {e}");
        });
    });

    Ok((addr, event_rx))
}

async fn handle_webhook(
    State(state): State<ServerState>,
    VerifiedDelivery {
        delivery_id,
        delivery,
    }: VerifiedDelivery,
) -> StatusCode {
    log::info!(
        "accepted {} delivery {delivery_id}",
        delivery.event()
    );

    let received = ReceivedDelivery::new(delivery_id, delivery);
    if state.event_tx.send(received).is_err() {
        log::error!("delivery receiver dropped; discarding delivery");
    }

    StatusCode::OK
}
