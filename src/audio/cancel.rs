//! Cooperative cancellation for blocking playback
//!
//! [`cancellation`] returns a [`Canceller`] that can be cloned and handed to
//! another thread, and the [`CancelSignal`] that a blocking call watches.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Requests cancellation of a running playback
#[derive(Clone, Debug)]
pub struct Canceller {
    tx: Sender<()>,
}

impl Canceller {
    /// Signal cancellation. Repeated calls are harmless.
    pub fn cancel(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Watched by a blocking call to notice cancellation
#[derive(Debug)]
pub struct CancelSignal {
    rx: Receiver<()>,
    // Held by signals that can never fire, so the channel stays connected
    _keepalive: Option<Sender<()>>,
}

impl CancelSignal {
    /// A signal nothing can trigger
    pub fn never() -> Self {
        let (tx, rx) = bounded(1);
        Self {
            rx,
            _keepalive: Some(tx),
        }
    }

    /// Drop a cancellation request that arrived while nothing was waiting
    pub fn reset(&self) {
        while self.rx.try_recv().is_ok() {}
    }

    /// Block for up to `timeout`, returning early with `true` on cancellation.
    ///
    /// The request is consumed, so a signal cancels one wait.
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            // Every canceller is gone, so nothing can cancel any more
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(timeout);
                false
            }
        }
    }
}

/// Create a connected canceller / signal pair
pub fn cancellation() -> (Canceller, CancelSignal) {
    let (tx, rx) = bounded(1);
    (
        Canceller { tx },
        CancelSignal {
            rx,
            _keepalive: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_wait_times_out() {
        let (_canceller, signal) = cancellation();
        let start = Instant::now();
        assert!(!signal.wait(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_cancel_wakes_waiter() {
        let (canceller, signal) = cancellation();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            canceller.cancel();
        });

        let start = Instant::now();
        assert!(signal.wait(Duration::from_secs(5)));
        assert!(start.elapsed() < Duration::from_secs(1));
        handle.join().unwrap();
    }

    #[test]
    fn test_repeated_cancel_is_harmless() {
        let (canceller, signal) = cancellation();
        canceller.cancel();
        canceller.cancel();
        assert!(signal.wait(Duration::from_millis(10)));
        assert!(!signal.wait(Duration::from_millis(5)));
    }

    #[test]
    fn test_reset_discards_stale_request() {
        let (canceller, signal) = cancellation();
        canceller.cancel();
        signal.reset();
        assert!(!signal.wait(Duration::from_millis(5)));
    }

    #[test]
    fn test_never_does_not_fire() {
        let signal = CancelSignal::never();
        assert!(!signal.wait(Duration::from_millis(5)));
    }

    #[test]
    fn test_dropped_canceller_does_not_cancel() {
        let (canceller, signal) = cancellation();
        drop(canceller);
        assert!(!signal.wait(Duration::from_millis(5)));
    }
}
