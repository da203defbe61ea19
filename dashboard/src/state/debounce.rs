//! Single-slot debounce timer.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Runs the most recently scheduled action once `delay` has passed without another
/// call to [`Debouncer::schedule`].
///
/// Rescheduling only interrupts a timer that is still waiting; an action whose timer
/// already fired runs to completion.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace the pending action with `action`. Must be called inside a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timer = CancellationToken::new();
        if let Some(previous) = self.pending.lock().replace(timer.clone()) {
            previous.cancel();
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            // Fired: no longer pending, and a late reschedule must not touch this run.
            timer.cancel();
            action.await;
        });
    }

    /// Drop the pending action, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.cancel();
        }
    }

    /// A timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|timer| !timer.is_cancelled())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_only_last_action_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(40));
        let fired = Arc::new(Mutex::new(Vec::new()));

        for keystroke in ["n", "no", "nor", "nort", "north"] {
            let fired = fired.clone();
            debouncer.schedule(async move {
                fired.lock().push(keystroke);
            });
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(*fired.lock(), vec!["north"]);
    }

    #[tokio::test]
    async fn test_cancel_drops_pending_action() {
        let debouncer = Debouncer::new(Duration::from_millis(20));
        let fired = Arc::new(Mutex::new(0));

        let counter = fired.clone();
        debouncer.schedule(async move {
            *counter.lock() += 1;
        });
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(*fired.lock(), 0);
    }

    #[tokio::test]
    async fn test_spaced_calls_each_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(10));
        let fired = Arc::new(Mutex::new(0));

        for _ in 0..2 {
            let counter = fired.clone();
            debouncer.schedule(async move {
                *counter.lock() += 1;
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(*fired.lock(), 2);
    }
}
