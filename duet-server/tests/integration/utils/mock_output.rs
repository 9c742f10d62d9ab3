use async_trait::async_trait;
use duet_core::{PeerId, ServerMessage};
use duet_server::SignalingOutput;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock SignalingOutput that captures all outgoing signals per peer.
///
/// # Example
///
/// ```ignore
/// let output = MockOutput::new();
///
/// // ... coordinator sends events ...
///
/// let msgs = output.sent_to(&peer).await;
/// assert_eq!(msgs, vec![ServerMessage::Joined { initiator: true }]);
/// ```
#[derive(Clone, Default)]
pub struct MockOutput {
    signals: Arc<Mutex<Vec<(PeerId, ServerMessage)>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured signals in send order.
    pub async fn all(&self) -> Vec<(PeerId, ServerMessage)> {
        self.signals.lock().await.clone()
    }

    /// Messages delivered to one peer, in send order.
    pub async fn sent_to(&self, peer_id: &PeerId) -> Vec<ServerMessage> {
        self.signals
            .lock()
            .await
            .iter()
            .filter(|(id, _)| id == peer_id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// Count of messages delivered to one peer.
    pub async fn count_for(&self, peer_id: &PeerId) -> usize {
        self.sent_to(peer_id).await.len()
    }
}

#[async_trait]
impl SignalingOutput for MockOutput {
    async fn send(&self, peer_id: PeerId, msg: ServerMessage) {
        tracing::debug!("[MockOutput] send to {peer_id}: {msg:?}");
        self.signals.lock().await.push((peer_id, msg));
    }
}
