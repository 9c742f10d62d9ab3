mod room_table;

pub use room_table::{JoinOutcome, LeaveOutcome, RoomTable};
