pub mod cancellation;
pub mod storage;

pub use cancellation::{Cancellable, CancellationToken};
pub use storage::{IScorecardStore, ISimulationStore, ISynthStore, RunFilter};
