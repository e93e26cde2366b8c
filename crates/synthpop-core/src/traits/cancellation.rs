//! Cancellation shared between a request and the rayon workers serving it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{SynthpopError, SynthpopResult};

/// Polled by the engine before each synth and every
/// `CANCEL_CHECK_INTERVAL` trials, and by sensitivity analysis between
/// batches. Implementors are read from many worker threads at once.
pub trait Cancellable: Send + Sync {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);

    /// `Err(Cancelled)` once cancellation has been requested.
    fn check(&self) -> SynthpopResult<()> {
        if self.is_cancelled() {
            Err(SynthpopError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Clones share one flag, so a handle kept by the caller can stop a run
/// already executing on the pool.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}
