use thiserror::Error;

/// Join rejections surfaced to the requesting peer only. Nothing here is
/// fatal and none of these mutate the room table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    /// The room already holds two peers.
    #[error("room is full")]
    RoomFull,

    /// The peer is already a member of a room. Joins never move a peer;
    /// moving would leave a stale reference behind in the old room.
    #[error("already in a room")]
    AlreadyInRoom,
}
