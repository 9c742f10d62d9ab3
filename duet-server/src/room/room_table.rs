use crate::error::JoinError;
use duet_core::{PeerId, Role, RoomId};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

const ROOM_CAPACITY: usize = 2;

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub role: Role,
    /// Member count after the join (1 or 2).
    pub peer_count: usize,
    /// The peer that was already waiting in the room, if any.
    pub existing_peer: Option<PeerId>,
}

/// Result of a leave that actually removed the peer from a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveOutcome {
    pub room_id: RoomId,
    /// The member still in the room after the leave, if any.
    pub remaining: Option<PeerId>,
}

#[derive(Default)]
struct Inner {
    /// Room id -> members in join order. First member is the initiator.
    rooms: HashMap<RoomId, Vec<PeerId>>,
    /// Reverse index: which room each peer currently occupies.
    membership: HashMap<PeerId, RoomId>,
}

/// Tracks room membership for all rooms.
///
/// A room moves through member counts 0 -> 1 -> 2 and back; the entry is
/// created lazily on first join and removed as soon as the count reaches 0,
/// so identifiers are reusable and the table does not grow with churn.
///
/// All mutation happens inside one mutex-guarded critical section. Each
/// section is a handful of map operations, so a single lock keeps the
/// capacity and single-membership invariants trivially race-free; racing
/// joins to the same empty room are serialized and exactly one wins each
/// role slot.
#[derive(Default)]
pub struct RoomTable {
    inner: Mutex<Inner>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `peer` to the room named `room_id`, creating the room if it
    /// does not exist yet. The existence check, capacity check and insert
    /// are one atomic step.
    pub fn join(&self, room_id: &RoomId, peer: PeerId) -> Result<JoinOutcome, JoinError> {
        let mut inner = self.lock();

        if inner.membership.contains_key(&peer) {
            return Err(JoinError::AlreadyInRoom);
        }

        let members = inner.rooms.entry(room_id.clone()).or_default();
        if members.len() >= ROOM_CAPACITY {
            return Err(JoinError::RoomFull);
        }

        let role = if members.is_empty() {
            Role::Initiator
        } else {
            Role::Responder
        };
        let existing_peer = members.first().copied();
        members.push(peer);
        let peer_count = members.len();

        inner.membership.insert(peer, room_id.clone());

        info!(%peer, room = %room_id, ?role, peer_count, "peer joined room");

        Ok(JoinOutcome {
            role,
            peer_count,
            existing_peer,
        })
    }

    /// Removes `peer` from whatever room it occupies. Idempotent: a peer
    /// that is not in any room is a no-op returning `None`. Deletes the
    /// room entry when the last member leaves.
    pub fn leave(&self, peer: &PeerId) -> Option<LeaveOutcome> {
        let mut inner = self.lock();

        let room_id = inner.membership.remove(peer)?;

        let remaining = match inner.rooms.get_mut(&room_id) {
            Some(members) => {
                members.retain(|m| m != peer);
                members.first().copied()
            }
            None => None,
        };

        if remaining.is_none() {
            inner.rooms.remove(&room_id);
            info!(room = %room_id, "room is empty, removing");
        }

        debug!(%peer, room = %room_id, "peer left room");

        Some(LeaveOutcome { room_id, remaining })
    }

    /// The other member of `peer`'s room, but only if `peer` really is a
    /// member of `room_id`. Relays must target the paired peer, never
    /// whatever else happens to share the identifier.
    pub fn peer_of(&self, peer: &PeerId, room_id: &RoomId) -> Option<PeerId> {
        let inner = self.lock();

        if inner.membership.get(peer) != Some(room_id) {
            return None;
        }

        inner
            .rooms
            .get(room_id)?
            .iter()
            .find(|m| *m != peer)
            .copied()
    }

    /// Snapshot of a room's members in join order.
    pub fn members(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.lock().rooms.get(room_id).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
