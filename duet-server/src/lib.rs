pub mod error;
pub mod room;
pub mod signaling;

pub use error::JoinError;
pub use room::{JoinOutcome, LeaveOutcome, RoomTable};
pub use signaling::{Coordinator, ConnectionRegistry, SignalingOutput, router};
