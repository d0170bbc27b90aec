pub mod local_transport;
pub mod test_clock;

pub use helpers::*;
pub use local_transport::{LinkConditioner, LocalTransport};
pub use test_clock::ManualClock;
pub use test_simulation::{RecordingSimulation, SimEvent, TestReplayQueue};
