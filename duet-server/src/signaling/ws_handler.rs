use crate::signaling::{ConnectionRegistry, Coordinator};
use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use duet_core::{ClientMessage, PeerId};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Shared server state handed to every connection task.
#[derive(Clone)]
pub struct SignalingService {
    registry: Arc<ConnectionRegistry>,
    coordinator: Arc<Coordinator>,
}

impl SignalingService {
    pub fn new() -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let coordinator = Arc::new(Coordinator::new(registry.clone()));
        Self {
            registry,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }
}

impl Default for SignalingService {
    fn default() -> Self {
        Self::new()
    }
}

/// The signaling endpoint: one WebSocket per client at `GET /ws`.
pub fn router() -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(SignalingService::new())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    // Identities are server-assigned; clients never pick their own.
    let peer_id = PeerId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, service))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, service: SignalingService) {
    info!(%peer_id, "new WebSocket connection");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.registry.add_peer(peer_id, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    error!(%peer_id, "failed to serialize server message: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let coordinator = service.coordinator.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => coordinator.handle(peer_id, client_msg).await,
                        // A malformed message never affects other
                        // connections; log and keep reading.
                        Err(e) => warn!(%peer_id, "invalid client message: {e}"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Runs on every teardown path, so the room is always cleaned up and
    // the remaining peer always learns its partner left.
    service.coordinator.disconnect(peer_id).await;
    service.registry.remove_peer(&peer_id);
    info!(%peer_id, "WebSocket disconnected");
}
