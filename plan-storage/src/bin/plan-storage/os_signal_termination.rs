use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use plan_storage::engine::termination::CancellationFlag;
use plan_storage::engine::termination::TerminationCondition;

/// A [`TerminationCondition`] which triggers due to a SIGINT or SIGTERM signal.
#[derive(Clone, Debug)]
pub(crate) struct OsSignal {
    signal_received: CancellationFlag,
}

impl OsSignal {
    /// Create a termination and install the signal listeners.
    pub(crate) fn install() -> std::io::Result<OsSignal> {
        const TERMINATION_SIGNALS: &[std::ffi::c_int] =
            &[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM];

        let signal_received = Arc::new(AtomicBool::new(false));

        for &signal in TERMINATION_SIGNALS {
            let _ = signal_hook::flag::register(signal, Arc::clone(&signal_received))?;
        }

        Ok(OsSignal {
            signal_received: CancellationFlag::from_shared(signal_received),
        })
    }
}

impl TerminationCondition for OsSignal {
    fn should_stop(&mut self) -> bool {
        self.signal_received.is_cancelled()
    }
}
