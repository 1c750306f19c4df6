use std::time::Duration;

use tokio::task::AbortHandle;

/// Timer that fires a callback once input has been quiet for `delay`.
///
/// Every [`trigger`](Debouncer::trigger) supersedes the previous one. The
/// pending timer task is aborted, but the callback also receives a ticket
/// that must be confirmed with [`finish`](Debouncer::finish): a timer that
/// slipped past the abort sees a stale ticket and does nothing.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    ticket: u64,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ticket: 0,
            pending: None,
        }
    }

    /// Arms the timer and returns the ticket handed to `on_elapsed`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn trigger<F>(&mut self, on_elapsed: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel_pending();
        self.ticket += 1;
        let ticket = self.ticket;
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_elapsed(ticket);
        });
        self.pending = Some(handle.abort_handle());
        ticket
    }

    /// Accepts the elapsed `ticket` if it is the latest one, clearing the
    /// pending state. Returns `false` for superseded tickets.
    pub fn finish(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.pending.is_none() {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any pending trigger without firing it.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.ticket += 1;
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_trigger_fires() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        for _ in 0..3 {
            let fired = Arc::clone(&fired);
            debouncer.trigger(move |ticket| fired.lock().unwrap().push(ticket));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(debouncer.is_pending());
        assert!(fired.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(500)).await;

        let fired = fired.lock().unwrap().clone();
        assert_eq!(fired, vec![3]);
        assert!(debouncer.finish(3));
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_and_reset_tickets_are_refused() {
        let mut debouncer = Debouncer::new(Duration::from_millis(50));
        let first = debouncer.trigger(|_| {});
        let second = debouncer.trigger(|_| {});

        assert!(!debouncer.finish(first));
        debouncer.reset();
        assert!(!debouncer.finish(second));
        assert!(!debouncer.is_pending());
    }
}
