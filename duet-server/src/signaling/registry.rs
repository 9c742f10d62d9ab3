use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use dashmap::DashMap;
use duet_core::{PeerId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Tracks every live connection and its outbound message channel.
///
/// Each connection gets an unbounded sender registered on upgrade and
/// removed on disconnect; the per-peer channel keeps delivery ordered
/// relative to everything else sent to that peer.
#[derive(Default)]
pub struct ConnectionRegistry {
    peers: DashMap<PeerId, mpsc::UnboundedSender<ServerMessage>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<ServerMessage>) {
        self.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.peers.remove(peer_id);
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[async_trait]
impl SignalingOutput for ConnectionRegistry {
    async fn send(&self, peer_id: PeerId, msg: ServerMessage) {
        match self.peers.get(&peer_id) {
            Some(tx) => {
                if tx.send(msg).is_err() {
                    // Send task already gone; the connection is tearing down.
                    debug!(%peer_id, "outbound channel closed, dropping message");
                }
            }
            None => {
                warn!(%peer_id, "attempted to send to disconnected peer");
            }
        }
    }
}
