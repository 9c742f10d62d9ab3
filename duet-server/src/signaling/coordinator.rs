use crate::error::JoinError;
use crate::room::RoomTable;
use crate::signaling::SignalingOutput;
use duet_core::{ClientMessage, PeerId, RoomId, ServerMessage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The signaling core: owns the room table and turns inbound client
/// messages into room mutations and outbound events.
///
/// Each room walks `Empty -> Waiting -> Paired` and back; the states are
/// the member counts 0/1/2 in the table. Relayed payloads pass through
/// untouched, and since every connection is handled by a single receive
/// loop feeding a single ordered channel per recipient, messages from one
/// sender reach its peer in submission order.
pub struct Coordinator {
    table: RoomTable,
    output: Arc<dyn SignalingOutput>,
}

impl Coordinator {
    pub fn new(output: Arc<dyn SignalingOutput>) -> Self {
        Self {
            table: RoomTable::new(),
            output,
        }
    }

    /// Explicit dispatch over the inbound protocol. Everything except
    /// `join` is a relay to the sender's paired peer.
    pub async fn handle(&self, sender: PeerId, msg: ClientMessage) {
        match msg {
            ClientMessage::Join { room } => self.join(sender, &room).await,
            ClientMessage::Offer { room, offer } => {
                self.relay(sender, &room, ServerMessage::Offer { offer }).await;
            }
            ClientMessage::Answer { room, answer } => {
                self.relay(sender, &room, ServerMessage::Answer { answer }).await;
            }
            ClientMessage::Candidate { room, candidate } => {
                self.relay(sender, &room, ServerMessage::Candidate { candidate })
                    .await;
            }
            ClientMessage::ChatMessage { room, message } => {
                self.relay(sender, &room, ServerMessage::ChatMessage { message })
                    .await;
            }
            ClientMessage::CodeChange { room, code } => {
                self.relay(sender, &room, ServerMessage::CodeChange { code })
                    .await;
            }
        }
    }

    /// Join protocol: first joiner becomes initiator and waits; the second
    /// becomes responder, and only the waiting peer is told `peer-joined`
    /// (its cue to originate the offer). A full room rejects the joiner
    /// without touching membership.
    async fn join(&self, peer: PeerId, room: &str) {
        let room_id: RoomId = match room.parse() {
            Ok(id) => id,
            Err(_) => {
                warn!(%peer, "join with empty room id");
                self.output
                    .send(
                        peer,
                        ServerMessage::Error {
                            reason: "invalid-room".to_string(),
                        },
                    )
                    .await;
                return;
            }
        };

        match self.table.join(&room_id, peer) {
            Ok(outcome) => {
                self.output
                    .send(
                        peer,
                        ServerMessage::Joined {
                            initiator: outcome.role.is_initiator(),
                        },
                    )
                    .await;

                if let Some(waiting) = outcome.existing_peer {
                    self.output.send(waiting, ServerMessage::PeerJoined).await;
                }
            }
            Err(JoinError::RoomFull) => {
                info!(%peer, room = %room_id, "join rejected, room full");
                self.output.send(peer, ServerMessage::RoomFull).await;
            }
            Err(err @ JoinError::AlreadyInRoom) => {
                warn!(%peer, room = %room_id, "join rejected, {err}");
                self.output
                    .send(
                        peer,
                        ServerMessage::Error {
                            reason: "already-in-room".to_string(),
                        },
                    )
                    .await;
            }
        }
    }

    /// Forwards `msg` to the sender's paired peer in `room`, verbatim.
    /// Fire-and-forget: with no peer present the message is dropped and the
    /// sender is not told.
    async fn relay(&self, sender: PeerId, room: &str, msg: ServerMessage) {
        let Ok(room_id) = room.parse::<RoomId>() else {
            debug!(%sender, "relay with empty room id, dropping");
            return;
        };

        let Some(peer) = self.table.peer_of(&sender, &room_id) else {
            debug!(%sender, room = %room_id, "relay with no peer present, dropping");
            return;
        };

        self.output.send(peer, msg).await;
    }

    /// Lifecycle path for an abrupt disconnect. Safe for connections that
    /// never joined a room; the remaining member (if any) is told its peer
    /// left so it can reset negotiation state.
    pub async fn disconnect(&self, peer: PeerId) {
        let Some(outcome) = self.table.leave(&peer) else {
            return;
        };

        info!(%peer, room = %outcome.room_id, "peer disconnected from room");

        if let Some(remaining) = outcome.remaining {
            self.output.send(remaining, ServerMessage::PeerLeft).await;
        }
    }

    /// Snapshot of a room's membership, mostly useful for tests and
    /// diagnostics.
    pub fn members(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.table.members(room_id)
    }
}
