mod replay;
pub mod tracing;

pub use replay::{ReplayRun, SharedBuffer, TestReplay};
pub use tracing::{CapturedEvent, events_named, init_test_tracing};
