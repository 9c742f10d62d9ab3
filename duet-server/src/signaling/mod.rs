mod coordinator;
mod registry;
mod signaling_output;
mod ws_handler;

pub use coordinator::Coordinator;
pub use registry::ConnectionRegistry;
pub use signaling_output::SignalingOutput;
pub use ws_handler::{SignalingService, router};
