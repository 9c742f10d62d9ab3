mod mock_output;

pub use mock_output::MockOutput;

use duet_server::Coordinator;
use std::sync::Arc;
use tracing::Level;

/// Initialize tracing for tests (call once per test).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Create a coordinator wired to a mock output that captures every
/// outbound signal per peer.
pub fn create_test_coordinator() -> (Arc<Coordinator>, MockOutput) {
    let output = MockOutput::new();
    let coordinator = Arc::new(Coordinator::new(Arc::new(output.clone())));
    (coordinator, output)
}
