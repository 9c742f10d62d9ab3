use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Negotiation role assigned by join order: the first peer into an empty
/// room originates the offer, the second answers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Initiator,
    Responder,
}

impl Role {
    pub fn is_initiator(&self) -> bool {
        matches!(self, Role::Initiator)
    }
}

/// Messages a client sends to the signaling server.
///
/// Offer/answer/candidate payloads are opaque: the server forwards them
/// verbatim and never looks inside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join {
        room: String,
    },
    Offer {
        room: String,
        offer: Value,
    },
    Answer {
        room: String,
        answer: Value,
    },
    Candidate {
        room: String,
        candidate: Value,
    },
    ChatMessage {
        room: String,
        message: String,
    },
    CodeChange {
        room: String,
        code: String,
    },
}

/// Messages the signaling server sends to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Join acknowledgment; `initiator` tells the client whether it is
    /// expected to originate the offer.
    Joined {
        initiator: bool,
    },
    /// Sent to the waiting peer when a second peer joins its room.
    PeerJoined,
    /// Join rejected: the room already holds two peers.
    RoomFull,
    /// The other peer left; the client should reset its negotiation state.
    PeerLeft,
    Offer {
        offer: Value,
    },
    Answer {
        answer: Value,
    },
    Candidate {
        candidate: Value,
    },
    ChatMessage {
        message: String,
    },
    CodeChange {
        code: String,
    },
    Error {
        reason: String,
    },
}
