pub mod model;

pub use model::{ClientMessage, InvalidRoomId, PeerId, Role, RoomId, ServerMessage};
