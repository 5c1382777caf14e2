use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once [`CancellationFlag::cancel`] has been called on
/// it or on any of its clones. Clones share the flag, so one can be handed to the solving engine
/// while another is kept to raise the cancellation from a different thread.
#[derive(Clone, Debug, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// Wrap an existing flag, e.g. one registered with a signal handler.
    pub fn from_shared(cancelled: Arc<AtomicBool>) -> CancellationFlag {
        CancellationFlag { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl TerminationCondition for CancellationFlag {
    fn should_stop(&mut self) -> bool {
        self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_the_same_cancellation() {
        let flag = CancellationFlag::default();
        let mut observer = flag.clone();

        assert!(!observer.should_stop());

        std::thread::spawn(move || flag.cancel()).join().unwrap();

        assert!(observer.should_stop());
    }
}
