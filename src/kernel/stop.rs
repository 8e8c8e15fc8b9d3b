use crossbeam_channel::{Receiver, TryRecvError};

/// Cancellation seen by a running workload.
///
/// Raised once the owner sends on, or drops, the paired sender. Workloads
/// poll it between batches; it carries no shared state.
#[derive(Debug)]
pub struct StopSignal {
    receiver: Option<Receiver<()>>,
}

impl StopSignal {
    pub fn new(receiver: Receiver<()>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// A signal that is never raised
    pub fn never() -> Self {
        Self { receiver: None }
    }

    pub fn is_raised(&self) -> bool {
        match &self.receiver {
            Some(receiver) => !matches!(receiver.try_recv(), Err(TryRecvError::Empty)),
            None => false,
        }
    }
}
