//! Debounced values for rapid-fire inputs.
//!
//! Search boxes emit a keystroke stream; issuing a catalog query per
//! keystroke is wasteful under a no-cache policy. [`Debounced`] forwards a
//! value to its output only after a quiet period: every `set` restarts the
//! timer, so a burst of updates converges to the final value only.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

/// A debounce cell: `set` on one side, a `watch` output on the other.
pub struct Debounced<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<T>,
}

impl<T> Debounced<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cell seeded with `initial` that settles after `delay`.
    ///
    /// The worker task exits when the cell (and its last subscriber) is
    /// dropped.
    #[must_use]
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, mut pending) = mpsc::unbounded_channel::<T>();
        let (publish, output) = watch::channel(initial);

        tokio::spawn(async move {
            // No candidate yet: just wait for the first update.
            while let Some(mut candidate) = pending.recv().await {
                loop {
                    tokio::select! {
                        // A newer value before the delay elapsed: restart.
                        newer = pending.recv() => match newer {
                            Some(value) => candidate = value,
                            None => {
                                // Input closed; publish the final value.
                                let _ = publish.send(candidate);
                                return;
                            }
                        },
                        () = sleep(delay) => {
                            if publish.send(candidate).is_err() {
                                return;
                            }
                            break;
                        }
                    }
                }
            }
        });

        Self { input, output }
    }

    /// Submit a new value, restarting the quiet-period timer.
    pub fn set(&self, value: T) {
        // The worker only exits when the channel closes, so send can only
        // fail during shutdown.
        let _ = self.input.send(value);
    }

    /// Current settled value.
    #[must_use]
    pub fn get(&self) -> T {
        self.output.borrow().clone()
    }

    /// Subscribe to settled values.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_value_settles_only_after_delay() {
        let debounced = Debounced::new(String::new(), DELAY);
        debounced.set("jacket".to_string());
        tokio::task::yield_now().await;

        // t=250ms: still the initial value.
        advance(Duration::from_millis(250)).await;
        assert_eq!(debounced.get(), "");

        // t=500ms: settled.
        advance(Duration::from_millis(250)).await;
        tokio::task::yield_now().await;
        assert_eq!(debounced.get(), "jacket");
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseding_update_resets_timer() {
        let debounced = Debounced::new(String::new(), DELAY);
        debounced.set("ja".to_string());
        tokio::task::yield_now().await;

        advance(Duration::from_millis(400)).await;
        debounced.set("jack".to_string());
        tokio::task::yield_now().await;

        // 500ms after the FIRST set, but only 100ms after the second.
        advance(Duration::from_millis(100)).await;
        assert_eq!(debounced.get(), "");

        advance(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;
        assert_eq!(debounced.get(), "jack");
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_converges_to_final_value_only() {
        let debounced = Debounced::new(String::new(), DELAY);
        let mut seen = debounced.subscribe();

        for value in ["j", "ja", "jac", "jack", "jacket"] {
            debounced.set(value.to_string());
            tokio::task::yield_now().await;
            advance(Duration::from_millis(100)).await;
        }

        advance(DELAY).await;
        tokio::task::yield_now().await;

        assert_eq!(debounced.get(), "jacket");
        // Intermediate values were never published.
        assert!(seen.has_changed().expect("watch open"));
        assert_eq!(*seen.borrow_and_update(), "jacket");
        assert!(!seen.has_changed().expect("watch open"));
    }
}
