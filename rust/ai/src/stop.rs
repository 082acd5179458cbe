use std::path::PathBuf;

/// Checked by the trainer after every batch. Returning true ends training.
pub trait StopSignal {
    fn should_stop(&mut self, batches_done: u64) -> bool;
}

/// Stops once a sentinel file exists.
#[derive(Debug, Clone)]
pub struct StopFile(pub PathBuf);

impl StopSignal for StopFile {
    fn should_stop(&mut self, _batches_done: u64) -> bool {
        self.0.exists()
    }
}

/// Stops after a fixed number of batches.
#[derive(Debug, Clone, Copy)]
pub struct BatchLimit(pub u64);

impl StopSignal for BatchLimit {
    fn should_stop(&mut self, batches_done: u64) -> bool {
        batches_done >= self.0
    }
}

impl<A: StopSignal, B: StopSignal> StopSignal for (A, B) {
    fn should_stop(&mut self, batches_done: u64) -> bool {
        self.0.should_stop(batches_done) || self.1.should_stop(batches_done)
    }
}

impl<S: StopSignal> StopSignal for Option<S> {
    fn should_stop(&mut self, batches_done: u64) -> bool {
        self.as_mut().is_some_and(|s| s.should_stop(batches_done))
    }
}
