use async_trait::async_trait;
use duet_core::{PeerId, ServerMessage};

/// Outbound half of the transport: how the coordinator reaches a specific
/// peer. Implemented by the connection registry in production and by mocks
/// in tests.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Best-effort delivery to one peer. A peer that disconnected between
    /// lookup and send just loses the message; the caller is never told.
    async fn send(&self, peer_id: PeerId, msg: ServerMessage);
}
