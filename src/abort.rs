//! Cooperative cancellation for in-flight lookups.
//!
//! An [`AbortController`] owns the abort state; any number of [`AbortSignal`]
//! clones observe it. The pipeline races each call against its signal, so one
//! controller can cancel several logical requests at once.

use tokio::sync::watch;

/// Owner side of a cancellation signal.
#[derive(Debug)]
pub struct AbortController {
    tx: watch::Sender<bool>,
}

impl AbortController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// A signal observing this controller. Cheap to clone and hand out per call.
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Fire the signal. Idempotent; every live signal observes the abort.
    pub fn abort(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a cancellation signal.
///
/// If the controller is dropped without aborting, the signal never fires and
/// [`AbortSignal::aborted`] pends forever; racing callers then settle through
/// normal completion.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    /// Whether the controller has already fired.
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the controller fires. Immediate if it already has.
    pub async fn aborted(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|aborted| *aborted).await.is_err() {
            // Controller dropped without aborting: this signal can never fire.
            std::future::pending::<()>().await;
        }
    }
}
